//! # Shell
//!
//! The single UI actor: reads one command per line, updates the view state,
//! calls the commands layer, and prints pages.
//!
//! ## Event Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            ┌──────────────── tokio::select! ────────────────┐           │
//! │            │                                                │           │
//! │     next input line                            pending FetchHandle      │
//! │            │                                                │           │
//! │            ▼                                                ▼           │
//! │   ShellCommand::from_str                         CatalogState::finish   │
//! │            │                                     (re-render the shop)   │
//! │            ▼                                                            │
//! │   navigate / picker / commands::*                                       │
//! │            │                                                            │
//! │            ▼                                                            │
//! │      write page to output                                               │
//! │                                                                         │
//! │  Leaving the shop cancels a pending fetch.                              │
//! │  Entering the shop without a listing starts one.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! In [`RunMode::Script`] the loop waits for a pending fetch before reading
//! the next line, so scripted sessions are deterministic.

use std::collections::HashMap;
use std::io;
use std::str::FromStr;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use shopfront_catalog::{FetchHandle, FetchOutcome, ProductFetch, ProductSource, RetrySettings};
use shopfront_core::{CartStore, ProductId};

use crate::commands;
use crate::error::ApiError;
use crate::input::QuantityPicker;
use crate::router::Route;
use crate::state::{CatalogState, ConfigState};
use crate::views;

const PROMPT: &str = "> ";

// =============================================================================
// Commands
// =============================================================================

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Navigate(Route),
    Increment(ProductId),
    Decrement(ProductId),
    /// Text typed into a product's quantity box
    TypeQuantity(ProductId, String),
    /// Add the given quantity, or the picker's when absent
    Add(ProductId, Option<i64>),
    SetQuantity(ProductId, i64),
    Remove(ProductId),
    Json,
    Refresh,
    Help,
    Quit,
    /// Blank line
    Nothing,
}

impl FromStr for ShellCommand {
    type Err = ApiError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(ShellCommand::Nothing);
        };
        let args: Vec<&str> = words.collect();

        let command = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("home", []) => ShellCommand::Navigate(Route::Home),
            ("shop", []) => ShellCommand::Navigate(Route::Shop),
            ("cart", []) => ShellCommand::Navigate(Route::Cart),
            ("go", [path]) => ShellCommand::Navigate(path.parse()?),
            ("inc", [id]) => ShellCommand::Increment(id.parse()?),
            ("dec", [id]) => ShellCommand::Decrement(id.parse()?),
            ("qty", [id, text @ ..]) if !text.is_empty() => {
                ShellCommand::TypeQuantity(id.parse()?, text.join(" "))
            }
            ("add", [id]) => ShellCommand::Add(id.parse()?, None),
            ("add", [id, qty]) => ShellCommand::Add(id.parse()?, Some(parse_whole(qty)?)),
            ("set", [id, qty]) => ShellCommand::SetQuantity(id.parse()?, parse_whole(qty)?),
            ("rm", [id]) => ShellCommand::Remove(id.parse()?),
            ("json", []) => ShellCommand::Json,
            ("refresh", []) => ShellCommand::Refresh,
            ("help", []) | ("?", []) => ShellCommand::Help,
            ("quit", []) | ("exit", []) => ShellCommand::Quit,
            _ => {
                return Err(ApiError::not_found(
                    "Command",
                    format!("{} (type `help`)", line.trim()),
                ))
            }
        };

        Ok(command)
    }
}

fn parse_whole(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::validation(format!("quantity must be a whole number: {}", raw)))
}

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Where input comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// A person at a terminal: prompt, and render fetch results as they land
    Interactive,
    /// A command file: echo each line, finish pending fetches first
    Script,
}

enum Event {
    Fetched(FetchOutcome),
    Line(io::Result<Option<String>>),
}

// =============================================================================
// Shell
// =============================================================================

/// View state plus the injected cart and product source.
pub struct Shell {
    cart: CartStore,
    catalog: CatalogState,
    config: ConfigState,
    source: Arc<dyn ProductSource>,
    retry: RetrySettings,
    route: Route,
    pickers: HashMap<ProductId, QuantityPicker>,
    pending: Option<FetchHandle>,
}

impl Shell {
    pub fn new(
        cart: CartStore,
        source: Arc<dyn ProductSource>,
        retry: RetrySettings,
        config: ConfigState,
    ) -> Self {
        Shell {
            cart,
            catalog: CatalogState::new(),
            config,
            source,
            retry,
            route: Route::Home,
            pickers: HashMap::new(),
            pending: None,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn catalog(&self) -> &CatalogState {
        &self.catalog
    }

    pub fn has_pending_fetch(&self) -> bool {
        self.pending.is_some()
    }

    /// Reads commands until `quit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, output: &mut W, mode: RunMode) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(session_id = %self.cart.session_id(), ?mode, "Shell started");
        let mut lines = input.lines();
        write_out(output, &self.render_page()).await?;

        loop {
            if mode == RunMode::Script {
                if let Some(outcome) = self.wait_for_fetch().await {
                    let text = self.on_fetch_outcome(outcome);
                    write_out(output, &text).await?;
                }
            } else {
                write_out(output, PROMPT).await?;
            }

            let event = tokio::select! {
                outcome = wait_pending(&mut self.pending) => Event::Fetched(outcome),
                line = lines.next_line() => Event::Line(line),
            };

            match event {
                Event::Fetched(outcome) => {
                    let text = self.on_fetch_outcome(outcome);
                    write_out(output, &text).await?;
                }
                Event::Line(line) => {
                    let Some(line) = line? else {
                        break;
                    };
                    if mode == RunMode::Script {
                        write_out(output, &format!("{}{}\n", PROMPT, line.trim())).await?;
                    }

                    let (flow, text) = self.handle_line(&line);
                    write_out(output, &text).await?;
                    if flow == Flow::Quit {
                        break;
                    }
                }
            }
        }

        self.cancel_fetch();
        info!(item_count = self.cart.item_count(), "Shell finished");
        Ok(())
    }

    /// Parses and executes one line; errors become printable text.
    pub fn handle_line(&mut self, line: &str) -> (Flow, String) {
        let result = line
            .parse::<ShellCommand>()
            .and_then(|command| self.execute(command));

        match result {
            Ok(outcome) => outcome,
            Err(e) => {
                debug!(error = %e, "Command rejected");
                (Flow::Continue, format!("{}\n", e))
            }
        }
    }

    pub fn execute(&mut self, command: ShellCommand) -> Result<(Flow, String), ApiError> {
        let text = match command {
            ShellCommand::Nothing => String::new(),
            ShellCommand::Navigate(route) => self.navigate(route),
            ShellCommand::Increment(id) => self.update_picker(id, QuantityPicker::increment)?,
            ShellCommand::Decrement(id) => self.update_picker(id, QuantityPicker::decrement)?,
            ShellCommand::TypeQuantity(id, text) => {
                self.update_picker(id, |picker| picker.set_from_input(&text))?
            }
            ShellCommand::Add(id, quantity) => {
                let quantity = quantity.unwrap_or_else(|| self.picker(id).value());
                let response = commands::add_to_cart(&self.catalog, &self.cart, id, quantity)?;
                format!("{}\n{}", response.message, self.render_nav())
            }
            ShellCommand::SetQuantity(id, quantity) => {
                let response = commands::update_cart_item(&self.cart, id, quantity);
                views::render_cart(&response, &self.config)
            }
            ShellCommand::Remove(id) => {
                let response = commands::remove_from_cart(&self.cart, id);
                views::render_cart(&response, &self.config)
            }
            ShellCommand::Json => {
                let cart = commands::get_cart(&self.cart);
                let json = serde_json::to_string_pretty(&cart)
                    .map_err(|e| ApiError::internal(e.to_string()))?;
                format!("{}\n", json)
            }
            ShellCommand::Refresh => {
                self.start_fetch();
                self.route = Route::Shop;
                self.render_page()
            }
            ShellCommand::Help => views::render_help(),
            ShellCommand::Quit => return Ok((Flow::Quit, String::new())),
        };

        Ok((Flow::Continue, text))
    }

    // -------------------------------------------------------------------------
    // Navigation and fetch lifecycle
    // -------------------------------------------------------------------------

    fn navigate(&mut self, route: Route) -> String {
        debug!(from = %self.route, to = %route, "Navigate");

        if self.route == Route::Shop && route != Route::Shop {
            self.cancel_fetch();
        }
        self.route = route;

        if route == Route::Shop && self.catalog.needs_fetch() {
            self.start_fetch();
        }

        self.render_page()
    }

    fn start_fetch(&mut self) {
        self.cancel_fetch();
        self.catalog.begin_loading();
        self.pending = Some(ProductFetch::spawn(
            Arc::clone(&self.source),
            self.retry.clone(),
        ));
    }

    fn cancel_fetch(&mut self) {
        if let Some(mut handle) = self.pending.take() {
            handle.cancel();
        }
        self.catalog.cancel_loading();
    }

    /// Waits for the pending fetch, if any.
    pub async fn wait_for_fetch(&mut self) -> Option<FetchOutcome> {
        let mut handle = self.pending.take()?;
        Some(handle.wait().await)
    }

    /// Applies a finished fetch and returns what to show.
    pub fn on_fetch_outcome(&mut self, outcome: FetchOutcome) -> String {
        self.pending = None;
        self.catalog.finish(outcome);

        if self.route == Route::Shop {
            self.render_page()
        } else {
            String::new()
        }
    }

    // -------------------------------------------------------------------------
    // Quantity pickers
    // -------------------------------------------------------------------------

    fn picker(&self, id: ProductId) -> QuantityPicker {
        self.pickers.get(&id).copied().unwrap_or_default()
    }

    fn update_picker<F>(&mut self, id: ProductId, update: F) -> Result<String, ApiError>
    where
        F: FnOnce(&mut QuantityPicker),
    {
        if self.catalog.catalog().is_none() {
            return Err(ApiError::catalog_unavailable());
        }
        let title = self
            .catalog
            .find(id)
            .map(|p| p.title.clone())
            .ok_or_else(|| ApiError::not_found("Product", id))?;

        let picker = self.pickers.entry(id).or_default();
        update(picker);
        Ok(format!("[{}] {} quantity: {}\n", id, title, picker.value()))
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    fn render_nav(&self) -> String {
        views::render_nav(&self.config, self.route, self.cart.item_count())
    }

    pub fn render_page(&self) -> String {
        let body = match self.route {
            Route::Home => views::render_home(),
            Route::Shop => views::render_shop(&self.catalog, &self.pickers, &self.config),
            Route::Cart => views::render_cart(&commands::get_cart(&self.cart), &self.config),
        };
        format!("{}{}", self.render_nav(), body)
    }
}

async fn wait_pending(pending: &mut Option<FetchHandle>) -> FetchOutcome {
    match pending {
        Some(handle) => handle.wait().await,
        None => std::future::pending().await,
    }
}

async fn write_out<W>(output: &mut W, text: &str) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await?;
    output.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use async_trait::async_trait;
    use shopfront_catalog::{CatalogResult, StaticProductSource};
    use shopfront_core::{Money, Product};

    fn products() -> Vec<Product> {
        vec![
            Product::new(1u64, "Shirt", Money::from_cents(999), "https://img/1.jpg"),
            Product::new(2u64, "Hat", Money::from_cents(1500), "https://img/2.jpg"),
        ]
    }

    fn shell_with(source: Arc<dyn ProductSource>) -> Shell {
        let retry = RetrySettings {
            max_attempts: 1,
            initial_backoff_ms: 1,
            max_backoff_secs: 1,
        };
        Shell::new(CartStore::new(), source, retry, ConfigState::default())
    }

    async fn shell_in_shop() -> Shell {
        let mut shell = shell_with(Arc::new(StaticProductSource::new(products())));
        shell.handle_line("shop");
        let outcome = shell.wait_for_fetch().await.unwrap();
        shell.on_fetch_outcome(outcome);
        shell
    }

    struct HangingSource;

    #[async_trait]
    impl ProductSource for HangingSource {
        async fn fetch_products(&self) -> CatalogResult<Vec<Product>> {
            std::future::pending().await
        }

        fn describe(&self) -> String {
            "hanging".into()
        }
    }

    /// Answers the first request, then never answers again.
    struct OnceThenHanging {
        calls: std::sync::atomic::AtomicUsize,
    }

    #[async_trait]
    impl ProductSource for OnceThenHanging {
        async fn fetch_products(&self) -> CatalogResult<Vec<Product>> {
            use std::sync::atomic::Ordering;
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(products())
            } else {
                std::future::pending().await
            }
        }

        fn describe(&self) -> String {
            "once-then-hanging".into()
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("".parse::<ShellCommand>().unwrap(), ShellCommand::Nothing);
        assert_eq!(
            "go /cart".parse::<ShellCommand>().unwrap(),
            ShellCommand::Navigate(Route::Cart)
        );
        assert_eq!(
            "add 3".parse::<ShellCommand>().unwrap(),
            ShellCommand::Add(ProductId::new(3), None)
        );
        assert_eq!(
            "ADD 3 -1".parse::<ShellCommand>().unwrap(),
            ShellCommand::Add(ProductId::new(3), Some(-1))
        );
        assert_eq!(
            "qty 2 12 abc".parse::<ShellCommand>().unwrap(),
            ShellCommand::TypeQuantity(ProductId::new(2), "12 abc".into())
        );
    }

    #[test]
    fn test_parse_errors() {
        let err = "dance".parse::<ShellCommand>().unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = "set 1 two".parse::<ShellCommand>().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = "rm abc".parse::<ShellCommand>().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = "go /checkout".parse::<ShellCommand>().unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_entering_shop_loads_catalog() {
        let mut shell = shell_with(Arc::new(StaticProductSource::new(products())));

        let (_, page) = shell.handle_line("shop");
        assert!(page.contains("Loading products..."));
        assert!(shell.has_pending_fetch());

        let outcome = shell.wait_for_fetch().await.unwrap();
        let page = shell.on_fetch_outcome(outcome);
        assert!(page.contains("[1] Shirt  $9.99"));
        assert!(shell.catalog().catalog().is_some());

        // A loaded listing is kept; coming back does not refetch.
        shell.handle_line("home");
        shell.handle_line("shop");
        assert!(!shell.has_pending_fetch());
    }

    #[tokio::test]
    async fn test_leaving_shop_cancels_fetch() {
        let mut shell = shell_with(Arc::new(HangingSource));

        shell.handle_line("shop");
        assert!(shell.catalog().is_loading());

        shell.handle_line("cart");
        assert!(!shell.has_pending_fetch());
        assert!(!shell.catalog().is_loading());
        assert_eq!(shell.route(), Route::Cart);
    }

    #[tokio::test]
    async fn test_abandoned_refresh_keeps_listing() {
        let mut shell = shell_with(Arc::new(OnceThenHanging {
            calls: Default::default(),
        }));
        shell.handle_line("shop");
        let outcome = shell.wait_for_fetch().await.unwrap();
        shell.on_fetch_outcome(outcome);

        shell.handle_line("refresh");
        assert!(shell.has_pending_fetch());

        shell.handle_line("cart");
        assert!(!shell.has_pending_fetch());
        assert!(shell.catalog().catalog().is_some());

        let (_, text) = shell.handle_line("add 1 1");
        assert!(text.contains("1 item(s) added to the cart."), "{}", text);
        assert_eq!(shell.cart().item_count(), 1);

        // Back on the shop page the kept listing is shown without a refetch.
        let (_, page) = shell.handle_line("shop");
        assert!(!shell.has_pending_fetch());
        assert!(page.contains("[1] Shirt  $9.99"));
    }

    #[tokio::test]
    async fn test_picker_then_add() {
        let mut shell = shell_in_shop().await;

        shell.handle_line("inc 1");
        shell.handle_line("inc 1");
        let (_, text) = shell.handle_line("add 1");
        assert!(text.contains("2 item(s) added to the cart."));
        assert!(text.contains("Cart Items: 2"));

        // The picker keeps its value, so adding again merges.
        shell.handle_line("add 1");
        assert_eq!(shell.cart().item_count(), 4);
        assert_eq!(shell.cart().snapshot().distinct_items(), 1);
    }

    #[tokio::test]
    async fn test_add_with_default_picker_adds_nothing() {
        let mut shell = shell_in_shop().await;

        let (_, text) = shell.handle_line("add 2");
        assert!(text.starts_with("Nothing added"));

        shell.handle_line("dec 2");
        let (_, text) = shell.handle_line("qty 2 -7");
        assert!(text.contains("quantity: 0"));
        assert_eq!(shell.cart().item_count(), 0);
    }

    #[tokio::test]
    async fn test_set_and_remove_render_cart() {
        let mut shell = shell_in_shop().await;
        shell.handle_line("add 1 2");

        let (_, text) = shell.handle_line("set 1 -5");
        assert!(text.contains("[1] Shirt  x1  $9.99"));

        let (_, text) = shell.handle_line("rm 1");
        assert!(text.contains("Your cart is empty."));
        assert_eq!(shell.cart().total(), Money::zero());
    }

    #[tokio::test]
    async fn test_add_before_loading_reports_error() {
        let mut shell = shell_with(Arc::new(StaticProductSource::new(products())));

        let (flow, text) = shell.handle_line("add 1 1");
        assert_eq!(flow, Flow::Continue);
        assert!(text.starts_with("[CATALOG_UNAVAILABLE]"));
    }

    #[tokio::test]
    async fn test_json_and_quit() {
        let mut shell = shell_in_shop().await;
        shell.handle_line("add 2 3");

        let (_, json) = shell.handle_line("json");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["totals"]["itemCount"], 3);

        let (flow, _) = shell.handle_line("quit");
        assert_eq!(flow, Flow::Quit);
    }

    #[tokio::test]
    async fn test_interactive_run_renders_fetch_result() {
        let mut shell = shell_with(Arc::new(StaticProductSource::new(products())));
        let mut output = Vec::new();

        // The fetch result may land before or after `cart`; both are valid,
        // but the session must end cleanly with nothing pending.
        shell
            .run(&b"shop\ncart\n"[..], &mut output, RunMode::Interactive)
            .await
            .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Shop Page"));
        assert!(text.contains("Cart Page"));
        assert!(!shell.has_pending_fetch());
    }
}
