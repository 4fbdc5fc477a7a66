//! HTTP presentation layer for the starchain registry.
//!
//! | route | operation |
//! |---|---|
//! | `POST /requestValidation` | issue an ownership challenge |
//! | `POST /submitstar` | register a star with a signed challenge |
//! | `GET /block/height/:height` | block by height |
//! | `GET /block/hash/:hash` | block by hash |
//! | `GET /blocks/:address` | stars registered by a wallet |
//! | `GET /validateChain` | integrity report |
//! | `GET /chain` | chain head summary |

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;

pub use config::ServerArgs;
pub use error::{ApiError, ApiResult};
pub use extract::{ApiJson, ApiPath};
pub use routes::{router, AppState};
