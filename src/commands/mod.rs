pub mod listen;
pub mod send;

// Re-export command functions for convenience
pub use listen::listen;
pub use send::send;
