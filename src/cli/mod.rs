pub mod convert;
pub mod setup;
pub mod shell;
pub mod suggest;
pub mod ui;
