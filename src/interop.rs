//! Ownership protocol for a memory region shared between the rasterizer and
//! the compute kernel.
//!
//! The region is allocated once and never copied; what changes frame-over-frame
//! is which side may touch it. `begin_compute_access` hands the region to the
//! compute side and returns a [`ComputeAccess`] token; only
//! [`end_compute_access`](Interop::end_compute_access) can consume that token
//! and hand the region back. Dispatching a kernel requires a live token, so a
//! dispatch outside the bracket does not compile. Calling `begin` twice, or
//! touching the graphics view while the compute side holds the region, is a
//! protocol violation and panics.

/// Which execution context may currently read/write the shared resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Graphics,
    Compute,
}

/// Proof that the compute side currently owns a shared resource.
///
/// Not `Clone`, not `Copy`: there is exactly one live token per bracket and
/// `end_compute_access` consumes it.
#[derive(Debug)]
pub struct ComputeAccess {
    _private: (),
}

/// A resource with exactly one writer and one reader that must never overlap,
/// tracked as a single allocation with two borrow modes rather than a lock.
#[derive(Debug)]
pub struct Interop<B> {
    resource: B,
    owner: Owner,
}

impl<B> Interop<B> {
    /// Registers a graphics-owned resource for shared access. Done once per
    /// buffer at initialization.
    pub fn register(resource: B) -> Self {
        Self {
            resource,
            owner: Owner::Graphics,
        }
    }

    pub fn owner(&self) -> Owner {
        self.owner
    }

    /// Hands the resource to the compute side.
    ///
    /// The caller must have drained all graphics work touching the resource
    /// beforehand; the resource contents are guaranteed unchanged since the
    /// last graphics use.
    ///
    /// # Panics
    /// If the compute side already owns the resource.
    pub fn begin_compute_access(&mut self) -> ComputeAccess {
        assert_eq!(
            self.owner,
            Owner::Graphics,
            "protocol violation: begin_compute_access while the buffer is compute-owned"
        );
        self.owner = Owner::Compute;
        ComputeAccess { _private: () }
    }

    /// Hands the resource back to the graphics side, consuming the token.
    ///
    /// The caller must have waited for the compute submission to complete;
    /// once this returns, the rasterizer observes every compute-side write.
    pub fn end_compute_access(&mut self, access: ComputeAccess) {
        assert_eq!(
            self.owner,
            Owner::Compute,
            "protocol violation: end_compute_access without a matching begin"
        );
        drop(access);
        self.owner = Owner::Graphics;
    }

    /// The resource, for the rasterizer.
    ///
    /// # Panics
    /// If the compute side currently owns the resource.
    pub fn graphics_view(&self) -> &B {
        assert_eq!(
            self.owner,
            Owner::Graphics,
            "protocol violation: graphics access while the buffer is compute-owned"
        );
        &self.resource
    }

    /// The resource, for the compute side. Requires the live token.
    pub fn compute_view(&self, _access: &ComputeAccess) -> &B {
        debug_assert_eq!(self.owner, Owner::Compute);
        &self.resource
    }

    /// The raw handle, without an ownership check. Used only to record bind
    /// group entries; recording a handle queues no device work, so it is safe
    /// on either side of the bracket.
    pub fn handle(&self) -> &B {
        &self.resource
    }
}
