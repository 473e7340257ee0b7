//! Legacy two-phase staging transfer.
//!
//! Fallback for container element kinds outside the closed set the
//! transfer engine supports: the producing wrapper stashes the value and
//! returns an explicit [`StagingHandle`]; the consuming wrapper redeems the
//! handle in a second call. The handle makes the two-phase protocol
//! call-frame scoped instead of relying on implicit ambient state (a stale
//! "most recent result" slot would be order-dependent).
//!
//! ## Known constraint
//!
//! The store is thread-local. Handles are meaningless on another thread,
//! and interleaving produce/consume pairs of reentrant calls on the same
//! thread only works because each pair is keyed by its own handle. This is
//! a documented limitation of the fallback, not something the transfer
//! engine solves.

use std::cell::RefCell;

use crate::ContainerError;

/// Opaque handle returned by [`stage`] and redeemed by [`take`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StagingHandle(u64);

thread_local! {
    static STAGED: RefCell<Vec<(u64, Vec<u8>)>> = const { RefCell::new(Vec::new()) };
    static NEXT_HANDLE: RefCell<u64> = const { RefCell::new(1) };
}

/// Stash an encoded value for a follow-up call on the same thread.
pub fn stage(bytes: Vec<u8>) -> StagingHandle {
    let id = NEXT_HANDLE.with(|n| {
        let mut n = n.borrow_mut();
        let id = *n;
        *n += 1;
        id
    });
    STAGED.with(|s| s.borrow_mut().push((id, bytes)));
    StagingHandle(id)
}

/// Redeem a staged value, consuming the handle.
///
/// A handle is single-use: a second `take` with the same handle (or a
/// handle from another thread) reports [`ContainerError::Empty`].
pub fn take(handle: StagingHandle) -> Result<Vec<u8>, ContainerError> {
    STAGED.with(|s| {
        let mut staged = s.borrow_mut();
        match staged.iter().position(|(id, _)| *id == handle.0) {
            Some(pos) => Ok(staged.swap_remove(pos).1),
            None => Err(ContainerError::Empty),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_then_take() {
        let h = stage(vec![1, 2, 3]);
        assert_eq!(take(h), Ok(vec![1, 2, 3]));
    }

    #[test]
    fn test_handle_is_single_use() {
        let h = stage(vec![9]);
        assert!(take(h).is_ok());
        assert_eq!(take(h), Err(ContainerError::Empty));
    }

    #[test]
    fn test_interleaved_pairs_keyed_by_handle() {
        let a = stage(vec![1]);
        let b = stage(vec![2]);
        // Out-of-order redemption works because handles scope each pair.
        assert_eq!(take(b), Ok(vec![2]));
        assert_eq!(take(a), Ok(vec![1]));
    }
}
