pub mod persona_store;
pub mod recommend_flow;
pub mod schedule_store;
