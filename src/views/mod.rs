pub mod day_grid;
pub mod month_view;
pub mod persona_form;
pub mod schedule_form;
