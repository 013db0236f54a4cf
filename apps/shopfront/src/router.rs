//! # Routing
//!
//! Maps paths to pages. Navigation never touches the cart.
//!
//! ```text
//! "/"      "home"  ──► Route::Home
//! "/shop"  "shop"  ──► Route::Shop
//! "/cart"  "cart"  ──► Route::Cart
//! anything else    ──► ApiError NOT_FOUND
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

/// A page the shell can show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Route {
    #[default]
    Home,
    Shop,
    Cart,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Home, Route::Shop, Route::Cart];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Shop => "/shop",
            Route::Cart => "/cart",
        }
    }

    /// Link label in the nav bar.
    pub fn label(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Shop => "Shop",
            Route::Cart => "Cart",
        }
    }
}

impl FromStr for Route {
    type Err = ApiError;

    /// Accepts `/shop`, `shop`, `/Shop/`; case-insensitive.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let name = trimmed.trim_matches('/').to_ascii_lowercase();

        match name.as_str() {
            "" | "home" => Ok(Route::Home),
            "shop" => Ok(Route::Shop),
            "cart" => Ok(Route::Cart),
            _ => Err(ApiError::not_found("Page", trimmed)),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
