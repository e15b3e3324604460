//! Proptest strategies for routes.

use proptest::prelude::*;

use super::node::{Route, RouteSeries, RouteSplit};
use crate::domain::Computer;

/// Computers with small integer scores, so ties actually happen.
pub(crate) fn arb_computer() -> impl Strategy<Value = Computer> {
    ("[a-z]{1,4}", 0u8..10, 0u8..20, 0u8..4).prop_map(|(name, d, v, r)| {
        Computer::new(name, f64::from(d), f64::from(v), f64::from(r))
            .expect("generated scores are non-negative")
    })
}

/// Arbitrary finite routes with nested splits.
pub(crate) fn arb_route() -> impl Strategy<Value = Route> {
    let leaf = Just(Route::new());
    leaf.prop_recursive(6, 48, 3, |inner| {
        prop_oneof![
            (arb_computer(), inner.clone())
                .prop_map(|(computer, following)| {
                    Route::from_node(RouteSeries::new(computer, following).into())
                }),
            (inner.clone(), inner.clone(), inner).prop_map(|(top, bottom, following)| {
                Route::from_node(RouteSplit::new(top, bottom, following).into())
            }),
        ]
    })
}
