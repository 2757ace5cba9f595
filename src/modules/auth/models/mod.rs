mod user;

pub use user::{CreateUserRequest, LoginRequest, LoginResponse, User, UserRole};
