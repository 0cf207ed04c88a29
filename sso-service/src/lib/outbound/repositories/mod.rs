pub mod postgres;

pub use postgres::PostgresStorage;
