//! Composite termination (OR).
//!
//! Uses macro-generated tuple implementations for zero type erasure.

use super::{Termination, TerminationReason};
use crate::scope::SearchState;

/// Combines multiple terminations with OR logic (any must terminate).
///
/// Children are checked in tuple order; the first reason found is reported.
///
/// # Examples
///
/// ```
/// use slotsearch_solver::termination::{
///     FrontierExhaustedTermination, OrTermination, RoundLimitTermination,
/// };
///
/// // Stop after 10 rounds OR when a round finds nothing new
/// let termination = OrTermination::new((
///     FrontierExhaustedTermination,
///     RoundLimitTermination::new(10),
/// ));
/// ```
#[derive(Debug)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    /// Creates a new OR termination from a tuple of terminations.
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

/// Generates `Termination` implementations for OR tuples.
macro_rules! impl_or_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> Termination for OrTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn check(&self, state: &SearchState) -> Option<TerminationReason> {
                $(
                    if let Some(reason) = (self.0).$idx.check(state) {
                        return Some(reason);
                    }
                )+
                None
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
impl_or_termination!(0: T0, 1: T1, 2: T2);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4);
