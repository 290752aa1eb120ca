pub mod common;

mod test_resolve_turn;
