//! # Repository Module
//!
//! Database repository implementations for the storefront.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Cart Manager / Product Store                                          │
//! │       │                                                                 │
//! │       │  db.carts().add_item(cart_id, product_id)                      │
//! │       ▼                                                                 │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────┐        │
//! │  │ProductRepository │ │ CartRepository   │ │SessionRepository │        │
//! │  │ insert / get     │ │ create / get     │ │ cart_for         │        │
//! │  │ list / delete    │ │ add / remove     │ │ bind             │        │
//! │  │ cart references  │ │ sell_item (tx)   │ │                  │        │
//! │  └────────┬─────────┘ └────────┬─────────┘ └────────┬─────────┘        │
//! │           └────────────────────┼────────────────────┘                   │
//! │                                ▼                                        │
//! │                         SQLite Database                                │
//! │                                                                         │
//! │  Repositories hold no business rules: clamping, stock checks and       │
//! │  total derivation happen in the layers above.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Catalog CRUD
//! - [`CartRepository`](cart::CartRepository) - Carts, items and checkout writes
//! - [`SessionRepository`](session::SessionRepository) - Session to cart bindings

pub mod cart;
pub mod product;
pub mod session;
