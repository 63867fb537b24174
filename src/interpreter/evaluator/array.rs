//! Dynamic arrays laid over numeric cells.
//!
//! An array is not a value of its own. For a pointer whose base address is
//! `a`, the cell at `a` holds the element count `n` and the cells `a + 1` to
//! `a + n` hold the elements in order. Every operation here reads and writes
//! through an [`Addressable`], so the same code serves the global store (`$`)
//! and a frame's local cells (`#`).

use std::collections::HashSet;

use crate::{
    error::RuntimeError,
    interpreter::evaluator::{capability::Addressable, core::EvalResult, scope::Scope},
    util::num::{address_key, from_count, to_count, truncate},
};

/// Writes `values` as a fresh array at the pointer and returns its address.
///
/// # Errors
/// Fails when the pointer cannot be resolved.
pub fn allocate(pointer: &dyn Addressable, values: &[f64], scope: Scope<'_>) -> EvalResult<f64> {
    let address = pointer.address(scope)?;

    pointer.set(address, from_count(values.len()), scope)?;
    for (i, &value) in values.iter().enumerate() {
        pointer.set(address + from_count(i + 1), value, scope)?;
    }

    Ok(address)
}

/// The stored element count.
///
/// # Errors
/// Fails when the pointer cannot be resolved.
pub fn length(pointer: &dyn Addressable, scope: Scope<'_>) -> EvalResult<f64> {
    let address = pointer.address(scope)?;
    pointer.get(address, scope)
}

fn cell(pointer: &dyn Addressable, index: f64, scope: Scope<'_>) -> EvalResult<f64> {
    let index = if index < 0.0 { length(pointer, scope)? + index } else { index };
    Ok(pointer.address(scope)? + index + 1.0)
}

/// Reads the element at `index`; negative indices count from the end.
///
/// Indices beyond the array read whatever the cell holds, which is `0` for a
/// cell never written.
///
/// # Errors
/// Fails when the pointer cannot be resolved.
pub fn get(pointer: &dyn Addressable, index: f64, scope: Scope<'_>) -> EvalResult<f64> {
    let cell = cell(pointer, index, scope)?;
    pointer.get(cell, scope)
}

/// Writes the element at `index` and returns the value; negative indices count
/// from the end. The stored length is left untouched.
///
/// # Errors
/// Fails when the pointer cannot be resolved.
pub fn set(pointer: &dyn Addressable, index: f64, value: f64, scope: Scope<'_>) -> EvalResult<f64> {
    let cell = cell(pointer, index, scope)?;
    pointer.set(cell, value, scope)
}

/// Appends a value and returns it.
///
/// # Errors
/// Fails when the pointer cannot be resolved.
pub fn add(pointer: &dyn Addressable, value: f64, scope: Scope<'_>) -> EvalResult<f64> {
    let address = pointer.address(scope)?;

    let length = pointer.get(address, scope)? + 1.0;
    pointer.set(address, length, scope)?;
    pointer.set(address + length, value, scope)?;

    Ok(value)
}

/// Inserts a value before the element at `index` and returns it.
///
/// `index` may equal the length, which appends; negative indices count from
/// the end.
///
/// # Errors
/// [`RuntimeError::InsertOutOfRange`] when the index lies outside the array.
pub fn insert(pointer: &dyn Addressable, index: f64, value: f64, scope: Scope<'_>) -> EvalResult<f64> {
    let mut values = collect(pointer, scope)?;

    let mut position = truncate(index);
    if position < 0 {
        position += i64::try_from(values.len()).unwrap_or(i64::MAX);
    }

    let slot = usize::try_from(position).ok().filter(|&slot| slot <= values.len());
    let Some(slot) = slot else {
        return Err(RuntimeError::InsertOutOfRange { address: address_key(pointer.address(scope)?),
                                                    index:   position, });
    };

    values.insert(slot, value);
    allocate(pointer, &values, scope)?;

    Ok(value)
}

/// Removes the first occurrence of `value`. Returns `1` when something was
/// removed and `0` otherwise.
///
/// # Errors
/// Fails when the pointer cannot be resolved.
#[allow(clippy::float_cmp)]
pub fn remove(pointer: &dyn Addressable, value: f64, scope: Scope<'_>) -> EvalResult<f64> {
    let mut values = collect(pointer, scope)?;

    let Some(position) = values.iter().position(|&x| x == value) else {
        return Ok(0.0);
    };

    values.remove(position);
    allocate(pointer, &values, scope)?;

    Ok(1.0)
}

/// The index of the first occurrence of `value`, or `-1`.
///
/// # Errors
/// Fails when the pointer cannot be resolved.
#[allow(clippy::float_cmp)]
pub fn index_of(pointer: &dyn Addressable, value: f64, scope: Scope<'_>) -> EvalResult<f64> {
    for (i, element) in enumerate(pointer, scope)?.enumerate() {
        if element? == value {
            return Ok(from_count(i));
        }
    }
    Ok(-1.0)
}

/// Empties the array and returns its address.
///
/// # Errors
/// Fails when the pointer cannot be resolved.
pub fn clear(pointer: &dyn Addressable, scope: Scope<'_>) -> EvalResult<f64> {
    allocate(pointer, &[], scope)
}

/// Writes the elements of `a` followed by those of `b` to `target` and
/// returns the target's address.
///
/// # Errors
/// Fails when any pointer cannot be resolved.
pub fn concat(a: &dyn Addressable,
              b: &dyn Addressable,
              target: &dyn Addressable,
              scope: Scope<'_>)
              -> EvalResult<f64> {
    let mut values = collect(a, scope)?;
    values.extend(collect(b, scope)?);
    allocate(target, &values, scope)
}

/// Copies the array at `from` to `to` and returns the destination address.
///
/// # Errors
/// Fails when either pointer cannot be resolved.
pub fn copy(from: &dyn Addressable, to: &dyn Addressable, scope: Scope<'_>) -> EvalResult<f64> {
    let values = collect(from, scope)?;
    allocate(to, &values, scope)
}

/// Drops repeated elements, keeping first occurrences in order, and returns
/// the address.
///
/// # Errors
/// Fails when the pointer cannot be resolved.
pub fn setify(pointer: &dyn Addressable, scope: Scope<'_>) -> EvalResult<f64> {
    let mut seen = HashSet::new();
    let values: Vec<f64> = collect(pointer, scope)?.into_iter()
                                                   .filter(|&x| {
                                                       let key = if x == 0.0 { 0 } else { x.to_bits() };
                                                       seen.insert(key)
                                                   })
                                                   .collect();
    allocate(pointer, &values, scope)
}

/// Sorts the array ascending and returns its address. `NaN`s sort last.
///
/// # Errors
/// Fails when the pointer cannot be resolved.
pub fn sort(pointer: &dyn Addressable, scope: Scope<'_>) -> EvalResult<f64> {
    let mut values = collect(pointer, scope)?;
    values.sort_by(f64::total_cmp);
    allocate(pointer, &values, scope)
}

/// Reads every element into a vector.
///
/// # Errors
/// Fails when the pointer cannot be resolved.
pub fn collect(pointer: &dyn Addressable, scope: Scope<'_>) -> EvalResult<Vec<f64>> {
    enumerate(pointer, scope)?.collect()
}

/// Returns a lazy iterator over the elements.
///
/// The length is read once, up front. Each element is read from its cell when
/// the iterator reaches it, so writes made while iterating are observed.
///
/// # Errors
/// Fails when the pointer cannot be resolved.
pub fn enumerate<'p, 'e>(pointer: &'p dyn Addressable,
                         scope: Scope<'e>)
                         -> EvalResult<Elements<'p, 'e>> {
    let address = pointer.address(scope)?;
    let length = to_count(pointer.get(address, scope)?);

    Ok(Elements { pointer,
                  scope,
                  address,
                  length,
                  next: 0 })
}

/// Iterator returned by [`enumerate`].
pub struct Elements<'p, 'e> {
    pointer: &'p dyn Addressable,
    scope:   Scope<'e>,
    address: f64,
    length:  usize,
    next:    usize,
}

impl Iterator for Elements<'_, '_> {
    type Item = EvalResult<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.length {
            return None;
        }
        self.next += 1;
        Some(self.pointer.get(self.address + from_count(self.next), self.scope))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.length - self.next;
        (remaining, Some(remaining))
    }
}
