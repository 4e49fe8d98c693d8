use super::*;

fn host() -> HeadlessHost {
    HeadlessHost::new(Viewport::new(320, 240).unwrap())
}

#[test]
fn frame_requests_are_delivered_oldest_first() {
    let mut h = host();
    let a = h.request_frame();
    let b = h.request_frame();
    assert_eq!(h.pending_frame_count(), 2);
    assert_eq!(h.deliver_frame(), Some(a));
    assert_eq!(h.deliver_frame(), Some(b));
    assert_eq!(h.deliver_frame(), None);
}

#[test]
fn cancelling_unknown_or_delivered_frames_is_ignored() {
    let mut h = host();
    let a = h.request_frame();
    h.deliver_frame();
    h.cancel_frame(a);
    h.cancel_frame(FrameRequestId(999));
    assert!(!h.events().iter().any(|e| matches!(e, HostEvent::FrameCancelled(_))));
}

#[test]
fn subscription_disposes_once() {
    let mut h = host();
    let mut sub = Subscription::subscribe(&mut h);
    assert!(sub.is_active());
    assert_eq!(h.listener_count(), 1);
    assert!(sub.dispose(&mut h));
    assert!(!sub.dispose(&mut h));
    assert!(!sub.is_active());
    assert_eq!(h.listener_count(), 0);
    let unsubs = h
        .events()
        .iter()
        .filter(|e| matches!(e, HostEvent::ResizeUnsubscribed(_)))
        .count();
    assert_eq!(unsubs, 1);
}

#[test]
fn mount_without_container_is_a_noop() {
    let mut h = host();
    h.detach_container();
    assert!(!h.container_attached());
    assert!(!h.mount_surface(SurfaceId(1)));
    assert_eq!(h.mounted_count(), 0);
    assert_eq!(h.events(), vec![HostEvent::MountSkipped(SurfaceId(1))]);
}

#[test]
fn unmount_after_container_removal_skips() {
    let mut h = host();
    assert!(h.mount_surface(SurfaceId(7)));
    assert!(h.is_mounted(SurfaceId(7)));
    h.detach_container();
    assert!(!h.unmount_surface(SurfaceId(7)));
    assert_eq!(h.events().last(), Some(&HostEvent::UnmountSkipped(SurfaceId(7))));
}

#[test]
fn clones_share_state() {
    let h = host().with_pixel_ratio(2.0);
    let mut other = h.clone();
    other.subscribe_resize();
    h.set_viewport(Viewport::new(10, 20).unwrap());
    assert_eq!(h.listener_count(), 1);
    assert_eq!(other.viewport(), Viewport::new(10, 20).unwrap());
    assert_eq!(other.device_pixel_ratio(), 2.0);
}
