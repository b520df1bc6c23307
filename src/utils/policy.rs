// src/utils/policy.rs
//
// The single authorization policy consulted by every protected route.
// Admin access is tied to one configured email; the role it implies is
// assigned at registration and carried in the JWT claims.

use crate::{config::Config, utils::jwt::Claims};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STUDENT: &str = "student";

/// Role granted to a fresh registration.
pub fn role_for_email(email: &str, config: &Config) -> &'static str {
    if email == config.admin_email {
        ROLE_ADMIN
    } else {
        ROLE_STUDENT
    }
}

/// Whether the authenticated identity may pass the admin gate.
pub fn is_admin(claims: &Claims) -> bool {
    claims.role == ROLE_ADMIN
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(admin_email: &str) -> Config {
        Config {
            database_url: String::new(),
            jwt_secret: "secret".to_string(),
            jwt_expiration: 600,
            rust_log: "error".to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
            admin_email: admin_email.to_string(),
            admin_name: None,
            admin_password: None,
        }
    }

    #[test]
    fn only_the_configured_email_gets_the_admin_role() {
        let config = config("admin@gmail.com");
        assert_eq!(role_for_email("admin@gmail.com", &config), ROLE_ADMIN);
        assert_eq!(role_for_email("student@gmail.com", &config), ROLE_STUDENT);
        // Exact match only; no case normalization.
        assert_eq!(role_for_email("Admin@gmail.com", &config), ROLE_STUDENT);
    }

    #[test]
    fn admin_gate_checks_the_claims_role() {
        let claims = Claims {
            sub: "uid".to_string(),
            email: "admin@gmail.com".to_string(),
            role: ROLE_ADMIN.to_string(),
            exp: 0,
        };
        assert!(is_admin(&claims));

        let claims = Claims {
            role: ROLE_STUDENT.to_string(),
            ..claims
        };
        assert!(!is_admin(&claims));
    }
}
