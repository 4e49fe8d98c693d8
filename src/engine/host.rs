//! Boundary between the engine and whatever embeds it.
//!
//! A host owns the container the output surface is mounted into, the display-refresh callback
//! queue and the resize event source. [`HeadlessHost`] is the in-memory implementation used by
//! the CLI and by tests.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::foundation::core::Viewport;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameRequestId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);

pub trait Host {
    /// Current logical viewport size.
    fn viewport(&self) -> Viewport;

    fn device_pixel_ratio(&self) -> f32;

    /// Whether the container the surface mounts into still exists.
    fn container_attached(&self) -> bool;

    /// Attach the surface to the container. Returns `false` (and does nothing) when there is no
    /// container.
    fn mount_surface(&mut self, surface: SurfaceId) -> bool;

    /// Detach the surface. Returns `false` when it was not attached or the container is gone.
    fn unmount_surface(&mut self, surface: SurfaceId) -> bool;

    /// Ask for one callback on the next display refresh.
    fn request_frame(&mut self) -> FrameRequestId;

    /// Cancel a pending request. Unknown or already-delivered ids are ignored.
    fn cancel_frame(&mut self, id: FrameRequestId);

    fn subscribe_resize(&mut self) -> ListenerId;

    fn unsubscribe_resize(&mut self, id: ListenerId);
}

/// Disposer for a resize subscription. Disposing more than once is a no-op.
#[derive(Debug)]
#[must_use = "a subscription must be disposed to detach its listener"]
pub struct Subscription {
    listener: Option<ListenerId>,
}

impl Subscription {
    pub fn subscribe<H: Host + ?Sized>(host: &mut H) -> Self {
        Self {
            listener: Some(host.subscribe_resize()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.listener.is_some()
    }

    /// Returns whether a listener was actually removed.
    pub fn dispose<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        match self.listener.take() {
            Some(id) => {
                host.unsubscribe_resize(id);
                true
            }
            None => false,
        }
    }
}

/// Lifecycle calls observed by a [`HeadlessHost`], in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostEvent {
    Mounted(SurfaceId),
    MountSkipped(SurfaceId),
    Unmounted(SurfaceId),
    UnmountSkipped(SurfaceId),
    FrameRequested(FrameRequestId),
    FrameDelivered(FrameRequestId),
    FrameCancelled(FrameRequestId),
    ResizeSubscribed(ListenerId),
    ResizeUnsubscribed(ListenerId),
}

#[derive(Debug)]
struct HostState {
    viewport: Viewport,
    pixel_ratio: f32,
    container_attached: bool,
    mounted: BTreeSet<SurfaceId>,
    listeners: BTreeSet<ListenerId>,
    pending_frames: BTreeSet<FrameRequestId>,
    next_id: u64,
    events: Vec<HostEvent>,
}

/// In-memory host. Clones share state, so a test can keep a handle while the engine owns another.
#[derive(Clone, Debug)]
pub struct HeadlessHost {
    state: Rc<RefCell<HostState>>,
}

impl HeadlessHost {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            state: Rc::new(RefCell::new(HostState {
                viewport,
                pixel_ratio: 1.0,
                container_attached: true,
                mounted: BTreeSet::new(),
                listeners: BTreeSet::new(),
                pending_frames: BTreeSet::new(),
                next_id: 1,
                events: Vec::new(),
            })),
        }
    }

    pub fn with_pixel_ratio(self, ratio: f32) -> Self {
        self.state.borrow_mut().pixel_ratio = ratio;
        self
    }

    /// Simulate a window resize. Subscribed listeners still have to be notified by the caller.
    pub fn set_viewport(&self, viewport: Viewport) {
        self.state.borrow_mut().viewport = viewport;
    }

    /// Remove the container, as if the surrounding page tore it down first.
    pub fn detach_container(&self) {
        let mut st = self.state.borrow_mut();
        st.container_attached = false;
        st.mounted.clear();
    }

    /// Deliver the oldest pending frame request, as a display refresh would.
    pub fn deliver_frame(&self) -> Option<FrameRequestId> {
        let mut st = self.state.borrow_mut();
        let id = st.pending_frames.pop_first()?;
        st.events.push(HostEvent::FrameDelivered(id));
        Some(id)
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    pub fn pending_frame_count(&self) -> usize {
        self.state.borrow().pending_frames.len()
    }

    pub fn is_mounted(&self, surface: SurfaceId) -> bool {
        self.state.borrow().mounted.contains(&surface)
    }

    pub fn mounted_count(&self) -> usize {
        self.state.borrow().mounted.len()
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.state.borrow().events.clone()
    }

    fn next_id(st: &mut HostState) -> u64 {
        let id = st.next_id;
        st.next_id += 1;
        id
    }
}

impl Host for HeadlessHost {
    fn viewport(&self) -> Viewport {
        self.state.borrow().viewport
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.state.borrow().pixel_ratio
    }

    fn container_attached(&self) -> bool {
        self.state.borrow().container_attached
    }

    fn mount_surface(&mut self, surface: SurfaceId) -> bool {
        let mut st = self.state.borrow_mut();
        if !st.container_attached {
            st.events.push(HostEvent::MountSkipped(surface));
            return false;
        }
        st.mounted.insert(surface);
        st.events.push(HostEvent::Mounted(surface));
        true
    }

    fn unmount_surface(&mut self, surface: SurfaceId) -> bool {
        let mut st = self.state.borrow_mut();
        if !st.container_attached || !st.mounted.remove(&surface) {
            st.events.push(HostEvent::UnmountSkipped(surface));
            return false;
        }
        st.events.push(HostEvent::Unmounted(surface));
        true
    }

    fn request_frame(&mut self) -> FrameRequestId {
        let mut st = self.state.borrow_mut();
        let id = FrameRequestId(Self::next_id(&mut st));
        st.pending_frames.insert(id);
        st.events.push(HostEvent::FrameRequested(id));
        id
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        let mut st = self.state.borrow_mut();
        if st.pending_frames.remove(&id) {
            st.events.push(HostEvent::FrameCancelled(id));
        }
    }

    fn subscribe_resize(&mut self) -> ListenerId {
        let mut st = self.state.borrow_mut();
        let id = ListenerId(Self::next_id(&mut st));
        st.listeners.insert(id);
        st.events.push(HostEvent::ResizeSubscribed(id));
        id
    }

    fn unsubscribe_resize(&mut self, id: ListenerId) {
        let mut st = self.state.borrow_mut();
        if st.listeners.remove(&id) {
            st.events.push(HostEvent::ResizeUnsubscribed(id));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/host.rs"]
mod tests;
