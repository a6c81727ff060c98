//! Entity module - Contains the `SeaORM` entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod budget_request;

pub use budget_request::{
    Column as BudgetRequestColumn, Entity as BudgetRequest, Model as BudgetRequestModel,
    NewBudgetRequest,
};
