//! Stack safety for recursive lowering.
//!
//! Values, nested blocks and program replay are all lowered by plain
//! recursion. Generated IR has no depth limit, so every recursive step goes
//! through [`ensure_sufficient_stack`], which grows the stack on native
//! targets when the remaining space drops below the red zone.

/// Grow when less than this remains (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if it is nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;
    use agnostic_ir::{Operator, Value};

    fn depth(value: &Value) -> usize {
        ensure_sufficient_stack(|| {
            1 + value
                .children()
                .into_iter()
                .map(depth)
                .max()
                .unwrap_or(0)
        })
    }

    #[test]
    fn test_deeply_nested_value() {
        let mut value = Value::Int(0);
        for _ in 0..50_000 {
            value = Value::combined(value, Operator::Add, Value::Int(1));
        }
        assert_eq!(depth(&value), 50_001);
        // Drop iteratively: the derived destructor is itself recursive.
        while let Value::Combined { left, .. } = value {
            value = *left;
        }
    }

    #[test]
    fn test_passes_result_through() {
        let result: Result<u8, &str> = ensure_sufficient_stack(|| Err("nope"));
        assert_eq!(result, Err("nope"));
    }
}
