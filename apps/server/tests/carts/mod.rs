//! Cart tests (GET /api/carts/:user_id, POST /api/carts/:user_id/items)

mod add;
