pub mod entities;
pub mod forms;
pub mod use_cases;
pub mod validation;
