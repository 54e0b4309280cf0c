//! Canned error responses for the list endpoint.
//!
//! `GET /items?simulate=<key>` returns one of these instead of the item list,
//! without touching the store. Unknown keys are ignored.

use axum::http::StatusCode;

/// A fixed status/message pair selected by a `simulate` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedFailure {
    pub key: &'static str,
    pub status: StatusCode,
    pub message: &'static str,
}

impl SimulatedFailure {
    pub const ALL: [SimulatedFailure; 6] = [
        SimulatedFailure {
            key: "server-error",
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Simulated internal server error",
        },
        SimulatedFailure {
            key: "bad-gateway",
            status: StatusCode::BAD_GATEWAY,
            message: "Simulated bad gateway: upstream returned an invalid response",
        },
        SimulatedFailure {
            key: "service-unavailable",
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: "Simulated service unavailable: please retry later",
        },
        SimulatedFailure {
            key: "unauthorized",
            status: StatusCode::UNAUTHORIZED,
            message: "Simulated unauthorized: authentication required",
        },
        SimulatedFailure {
            key: "forbidden",
            status: StatusCode::FORBIDDEN,
            message: "Simulated forbidden: access to this resource is denied",
        },
        SimulatedFailure {
            key: "teapot",
            status: StatusCode::IM_A_TEAPOT,
            message: "Simulated teapot: I'm a teapot",
        },
    ];

    /// Exact, case-sensitive lookup.
    pub fn lookup(key: &str) -> Option<Self> {
        Self::ALL.iter().find(|f| f.key == key).copied()
    }
}
