//! Grow a packed array of bits on demand.
//!
//! # Overview
//!
//! [BitArray] stores booleans packed into 64-bit words and addresses them by index. Writing an
//! index that lies beyond the current capacity doubles the storage (as many times as needed)
//! before the write; reading such an index returns `false` without allocating.
//!
//! All storage comes from an [Allocator]. The default, [Global], uses the process allocator
//! fallibly; [Bounded] caps the number of words held at once. Allocation failures surface as
//! [Error::Memory] instead of aborting.
//!
//! # Example
//!
//! ```
//! use bitarray::BitArray;
//!
//! let mut bits = BitArray::new();
//! assert_eq!(bits.capacity(), 64);
//!
//! bits.set(5).unwrap();
//! bits.set(200).unwrap();
//! assert_eq!(bits.capacity(), 256);
//! assert!(bits.get(5));
//! assert!(!bits.get(199));
//!
//! bits.push(true).unwrap();
//! bits.push(false).unwrap();
//! assert_eq!(bits.len(), 2);
//! ```
//!
//! # Bounding Memory
//!
//! ```
//! use bitarray::{BitArray, Bounded, Error};
//!
//! let budget = Bounded::new(2);
//! let mut bits = BitArray::with_allocator(budget.clone()).unwrap();
//! bits.set(100).unwrap();
//! assert!(matches!(bits.set(1_000), Err(Error::Memory(_))));
//! assert_eq!(bits.capacity(), 128);
//!
//! drop(bits);
//! assert_eq!(budget.used(), 0);
//! ```

pub mod allocator;
pub use allocator::{AllocError, Allocator, Bounded, Global};
mod array;
pub use array::BitArray;
mod config;
pub use config::Config;
mod error;
pub use error::Error;
pub mod storage;
pub mod word;
