//! Property tests for the cart state machine over random command sequences.

use proptest::prelude::*;
use rust_decimal::Decimal;
use shopfront_core::{reduce, CartCommand, CartState, Money, Product, ProductId};

const PRODUCT_IDS: u64 = 6;

fn catalog_product(id: u64) -> Product {
    // Fixed price per id so merged line items always agree on price.
    Product::new(
        id,
        format!("Product {}", id),
        Money::from_cents(id as i64 * 137 + 99),
        format!("https://img.example/{}.jpg", id),
    )
}

fn command() -> impl Strategy<Value = CartCommand> {
    prop_oneof![
        (0..PRODUCT_IDS, -5i64..20).prop_map(|(id, qty)| CartCommand::add(catalog_product(id), qty)),
        (0..PRODUCT_IDS, -10i64..10).prop_map(|(id, qty)| CartCommand::set_quantity(id, qty)),
        (0..PRODUCT_IDS).prop_map(|id| CartCommand::remove(id)),
    ]
}

fn run(commands: &[CartCommand]) -> CartState {
    commands
        .iter()
        .cloned()
        .fold(CartState::new(), reduce)
}

proptest! {
    #[test]
    fn quantities_never_drop_below_one(commands in prop::collection::vec(command(), 0..60)) {
        let state = run(&commands);
        for item in state.items() {
            prop_assert!(item.quantity() >= 1);
        }
    }

    #[test]
    fn line_items_are_unique_by_product(commands in prop::collection::vec(command(), 0..60)) {
        let state = run(&commands);
        let mut ids: Vec<ProductId> = state.items().iter().map(|i| i.product_id()).collect();
        let before = ids.len();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), before);
    }

    #[test]
    fn derived_values_match_items(commands in prop::collection::vec(command(), 0..60)) {
        let state = run(&commands);

        let expected_total: Decimal = state
            .items()
            .iter()
            .map(|i| i.product().price.amount() * Decimal::from(i.quantity()))
            .sum();
        let expected_count: i64 = state.items().iter().map(|i| i.quantity()).sum();

        prop_assert_eq!(state.total(), Money::from_decimal(expected_total));
        prop_assert_eq!(state.item_count(), expected_count);
        prop_assert_eq!(state.totals().distinct_items, state.items().len());
    }

    #[test]
    fn non_positive_add_leaves_state_equal(
        commands in prop::collection::vec(command(), 0..30),
        id in 0..PRODUCT_IDS,
        qty in -50i64..=0,
    ) {
        let state = run(&commands);
        let after = reduce(state.clone(), CartCommand::add(catalog_product(id), qty));
        prop_assert_eq!(after, state);
    }

    #[test]
    fn add_merges_regardless_of_interleaving(
        first in 1i64..50,
        second in 1i64..50,
        noise in prop::collection::vec((1..PRODUCT_IDS, 1i64..5), 0..10),
    ) {
        let mut commands = vec![CartCommand::add(catalog_product(0), first)];
        commands.extend(noise.into_iter().map(|(id, qty)| CartCommand::add(catalog_product(id), qty)));
        commands.push(CartCommand::add(catalog_product(0), second));

        let state = run(&commands);
        let item = state.get(ProductId::new(0)).expect("product 0 present");
        prop_assert_eq!(item.quantity(), first + second);
        prop_assert_eq!(state.items()[0].product_id(), ProductId::new(0));
    }

    #[test]
    fn remove_erases_product(
        commands in prop::collection::vec(command(), 0..40),
        id in 0..PRODUCT_IDS,
    ) {
        let state = reduce(run(&commands), CartCommand::remove(id));
        prop_assert!(state.get(ProductId::new(id)).is_none());
    }

    #[test]
    fn first_add_order_is_stable(commands in prop::collection::vec(command(), 0..60)) {
        // Surviving items must appear in the order of their latest first-add.
        let state = run(&commands);
        let mut expected: Vec<ProductId> = Vec::new();
        for command in &commands {
            match command {
                CartCommand::Add { product, quantity } if *quantity > 0 => {
                    if !expected.contains(&product.id) {
                        expected.push(product.id);
                    }
                }
                CartCommand::Remove { product_id } => expected.retain(|id| id != product_id),
                _ => {}
            }
        }
        let actual: Vec<ProductId> = state.items().iter().map(|i| i.product_id()).collect();
        prop_assert_eq!(actual, expected);
    }
}
