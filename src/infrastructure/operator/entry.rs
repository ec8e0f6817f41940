//! Operator entry type.

/// Stateless operator wiring inbound use-cases to application services.
///
/// Every call resolves its configuration and opens the store from the
/// [`SessionRequest`](crate::port::inbound::operator::session::SessionRequest)
/// it is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct Operator;
