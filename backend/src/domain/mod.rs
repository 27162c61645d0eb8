//! Domain primitives, ports and the registration simulator.
//!
//! Purpose: define the entities exchanged over HTTP and the traits outbound
//! adapters implement. Types validate on construction and document their
//! serialisation contracts (serde) in their own Rustdoc.
//!
//! Public surface:
//! - [`Error`] (alias of [`DomainError`]) and [`ErrorCode`]: API error
//!   payload and stable code.
//! - [`User`], [`Product`], [`Purchase`]: stored records.
//! - [`RegistrationSimulator`]: synthetic registration traffic loop.

pub mod error;
pub mod ports;
pub mod product;
pub mod purchase;
pub mod registration_simulator;
pub mod trace_id;
pub mod user;

pub use self::error::{DomainError, DomainError as Error, ErrorCode, TRACE_ID_HEADER};
pub use self::product::{Product, ProductDetails, ProductValidationError};
pub use self::purchase::{NewPurchase, Purchase};
pub use self::registration_simulator::{
    CycleReport, DEFAULT_BATCH_MAX, DEFAULT_BATCH_MIN, DEFAULT_DISPATCH_TIMEOUT,
    DEFAULT_SLEEP_MAX, DEFAULT_SLEEP_MIN, RegistrationSimulator, ShutdownSignal, ShutdownTrigger,
    SimulatorConfig, SimulatorConfigError, SimulatorRuntime, SimulatorSleeper, SimulatorSummary,
    TokioSleeper, shutdown_channel,
};
pub use self::trace_id::TraceId;
pub use self::user::{BIRTH_DATE_FORMAT, NewUser, User, UserProfile, UserValidationError};
