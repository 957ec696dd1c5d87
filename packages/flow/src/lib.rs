pub mod aadhaar;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod models;
pub mod notice;
pub mod otp;
pub mod service;

mod memory;
pub use memory::MemoryForm;

pub use aadhaar::{AadhaarStep, FamilyHeadOtp};
pub use config::FlowConfig;
pub use controller::{FormStore, LoginFormController};
pub use error::{FlowError, ServiceError};
pub use form::{LoginForm, LoginTab};
pub use models::{Credentials, OtpVerification, Role};
pub use notice::{Notice, NoticeLevel};
pub use otp::{OtpState, PhoneOtp};
pub use service::{AuthSession, OtpService};
