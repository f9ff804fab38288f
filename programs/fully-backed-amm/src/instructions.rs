#![allow(ambiguous_glob_reexports)]

pub mod custody;
pub mod pool_math;

pub mod initialize_pool;
pub mod deposit;
pub mod swap;
pub mod withdraw;

pub use initialize_pool::*;
pub use deposit::*;
pub use swap::*;
pub use withdraw::*;
