//! # roster-service
//!
//! Application layer containing business logic, services, validation, and DTOs.

pub mod dto;
pub mod services;
pub mod validation;

pub use dto::{
    AuthResponse, HealthChecks, HealthResponse, ListMembersQuery, LoginRequest,
    LookupQuery, MemberResponse, PaginatedResponse, ReadinessResponse, RefreshTokenRequest,
    ReplaceMemberRequest, SignupRequest, TokenResponse, UpdateMemberRequest,
};
pub use services::{AuthService, MemberService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult};
pub use validation::FieldError;
