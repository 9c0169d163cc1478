//! API route declarations (e.g., /api/*)

pub mod translate_routes;
