#![no_main]

use arbitrary::Arbitrary;
use bitarray::{BitArray, Bounded, Error};
use libfuzzer_sys::fuzz_target;
use std::collections::BTreeSet;

/// Largest index exercised, to keep allocations small.
const MAX_INDEX: usize = 1 << 20;

/// Word budget shared by the bounded array.
const BUDGET: usize = 1 << 10;

#[derive(Arbitrary, Debug)]
enum Operation {
    Get(usize),
    Set(usize),
    Clear(usize),
    Toggle(usize),
    SetTo(usize, bool),
    Push(bool),
}

fn fuzz(ops: Vec<Operation>) {
    let budget = Bounded::new(BUDGET);
    let mut bits = BitArray::with_allocator(budget.clone()).unwrap();
    let mut ones = BTreeSet::new();
    let mut len = 0;

    for op in ops {
        let capacity = bits.capacity();
        let result = match op {
            Operation::Get(index) => {
                assert_eq!(bits.get(index), ones.contains(&index));
                assert_eq!(bits.capacity(), capacity);
                continue;
            }
            Operation::Set(index) => {
                let index = index % MAX_INDEX;
                bits.set(index).map(|_| {
                    ones.insert(index);
                })
            }
            Operation::Clear(index) => {
                let index = index % MAX_INDEX;
                bits.clear(index).map(|_| {
                    ones.remove(&index);
                })
            }
            Operation::Toggle(index) => {
                let index = index % MAX_INDEX;
                bits.toggle(index).map(|_| {
                    if !ones.remove(&index) {
                        ones.insert(index);
                    }
                })
            }
            Operation::SetTo(index, value) => {
                let index = index % MAX_INDEX;
                bits.set_to(index, value).map(|_| {
                    if value {
                        ones.insert(index);
                    } else {
                        ones.remove(&index);
                    }
                })
            }
            Operation::Push(value) => {
                let index = bits.len();
                bits.push(value).map(|_| {
                    len += 1;
                    if value {
                        ones.insert(index);
                    } else {
                        ones.remove(&index);
                    }
                })
            }
        };

        match result {
            Ok(()) => {}
            Err(Error::Memory(_)) => assert!(budget.used() * 2 > BUDGET),
            Err(err) => panic!("unexpected error: {err}"),
        }

        // Capacity is monotonic and always a power-of-two multiple of the word width
        assert!(bits.capacity() >= capacity);
        assert!(bits.capacity().is_power_of_two());
        assert_eq!(bits.capacity(), bits.words().len() * 64);
        assert_eq!(bits.len(), len);
        assert!(bits.len() <= bits.capacity());
        assert_eq!(budget.used(), bits.words().len());
    }

    // Every bit matches the model
    let count: u32 = bits.words().iter().map(|w| w.count_ones()).sum();
    assert_eq!(count as usize, ones.len());
    for &index in &ones {
        assert!(bits.get(index));
    }

    drop(bits);
    assert_eq!(budget.used(), 0);
}

fuzz_target!(|ops: Vec<Operation>| {
    fuzz(ops);
});
