//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (write) are kept apart from query handlers (read).

pub mod handlers;

pub use handlers::{
    // Sale handlers
    EvaluateSaleCommand, EvaluateSaleHandler, EvaluateSaleResult,
    RegisterSaleCommand, RegisterSaleHandler, RegisterSaleResult,
    RequestVerificationCommand, RequestVerificationHandler, RequestVerificationResult,
    ListRedeemableCouponsHandler, ListRedeemableCouponsQuery, ListRedeemableCouponsResult,
    // Lifecycle handlers
    ActivationCycleHandler, RunActivationCycleCommand,
    ExpireCouponsCommand, ExpireCouponsHandler,
    LifecycleFailure, LifecycleRunReport,
};
