//! Filtered search tests (GET /api/products/filter)
