//! Push-based change notification between scene state and shader resources.
//!
//! Cameras and lights are *subjects*: mutating one immediately notifies every
//! attached *observer* (in practice, shader programs) so uniforms are
//! uploaded in response to change, not re-pushed every frame. Notification is
//! synchronous and unbatched — five setter calls mean five notify passes,
//! tolerated because uniform uploads are idempotent.
//!
//! The subject kind is a closed enum ([`SubjectRef`]), so observers branch on
//! it directly instead of inspecting run-time types. An observer attached to
//! a kind it does not care about simply ignores the notification.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::camera::Camera;
use crate::light::Light;

/// What changed on the notifying subject.
///
/// Lets observers skip recomputing the projection matrix for plain camera
/// movement, which is the overwhelmingly common notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeType {
    /// Position/orientation changed (or a light mutated).
    View,
    /// Projection parameters changed: fov, aspect ratio.
    Projection,
}

/// Borrowed view of the notifying subject, tagged by kind.
#[derive(Clone, Copy)]
pub enum SubjectRef<'a> {
    Camera(&'a Camera),
    Light(&'a Light),
}

/// Receives subject change notifications.
pub trait Observer {
    /// Called synchronously for every notification on an attached subject.
    ///
    /// Implementations must no-op on subject kinds they do not understand.
    fn on_notify(&mut self, subject: SubjectRef<'_>, change: ChangeType);
}

/// Shared handle under which observers are attached.
pub type ObserverHandle = Rc<RefCell<dyn Observer>>;

/// Observer list plus last-change tag, embedded in every concrete subject.
///
/// Holds weak references only: subjects never own their observers, and an
/// observer dropped elsewhere is pruned on the next notify rather than
/// dangling.
pub struct Subject {
    observers: Vec<Weak<RefCell<dyn Observer>>>,
    last_change: ChangeType,
}

impl Default for Subject {
    fn default() -> Self {
        Self {
            observers: Vec::new(),
            last_change: ChangeType::View,
        }
    }
}

impl Subject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an observer. Attaching the same observer twice delivers every
    /// notification twice; preventing that is the caller's job.
    pub fn attach(&mut self, observer: &ObserverHandle) {
        self.prune();
        self.observers.push(Rc::downgrade(observer));
    }

    /// Detach an observer. Detaching one that was never attached is a no-op.
    pub fn detach(&mut self, observer: &ObserverHandle) {
        let target = Rc::downgrade(observer);
        self.observers.retain(|o| !o.ptr_eq(&target));
    }

    /// Number of live attached observers.
    pub fn observer_count(&self) -> usize {
        self.observers.iter().filter(|o| o.strong_count() > 0).count()
    }

    /// Tag describing the most recent mutation; set by the subject right
    /// before it notifies.
    pub fn last_change(&self) -> ChangeType {
        self.last_change
    }

    pub fn set_last_change(&mut self, change: ChangeType) {
        self.last_change = change;
    }

    /// Invoke every live observer in attachment order. Entries whose
    /// observer has been dropped are skipped.
    pub fn notify(&self, subject: SubjectRef<'_>) {
        for observer in &self.observers {
            if let Some(observer) = observer.upgrade() {
                observer.borrow_mut().on_notify(subject, self.last_change);
            }
        }
    }

    /// Remove entries whose observer has been dropped.
    fn prune(&mut self) {
        self.observers.retain(|o| o.strong_count() > 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[derive(Default)]
    struct CountingObserver {
        camera_updates: usize,
        light_updates: usize,
        last_change: Option<ChangeType>,
        last_camera_pos: Option<Vec3>,
    }

    impl Observer for CountingObserver {
        fn on_notify(&mut self, subject: SubjectRef<'_>, change: ChangeType) {
            self.last_change = Some(change);
            match subject {
                SubjectRef::Camera(cam) => {
                    self.camera_updates += 1;
                    self.last_camera_pos = Some(cam.position());
                }
                SubjectRef::Light(_) => self.light_updates += 1,
            }
        }
    }

    fn counting() -> Rc<RefCell<CountingObserver>> {
        Rc::new(RefCell::new(CountingObserver::default()))
    }

    #[test]
    fn one_setter_notifies_every_observer_once() {
        let mut camera = Camera::new(Vec3::ZERO);
        let observers = [counting(), counting(), counting()];
        for obs in &observers {
            let handle: ObserverHandle = obs.clone();
            camera.attach(&handle);
        }

        let pos = Vec3::new(1.0, 2.0, 3.0);
        camera.set_position(pos);

        for obs in &observers {
            let obs = obs.borrow();
            assert_eq!(obs.camera_updates, 1);
            // Every observer saw the same subject state.
            assert_eq!(obs.last_camera_pos, Some(pos));
            assert_eq!(obs.last_change, Some(ChangeType::View));
        }
    }

    #[test]
    fn detach_is_idempotent() {
        let mut camera = Camera::new(Vec3::ZERO);
        let attached = counting();
        let stranger = counting();
        let attached_handle: ObserverHandle = attached.clone();
        let stranger_handle: ObserverHandle = stranger.clone();

        camera.attach(&attached_handle);
        assert_eq!(camera.observer_count(), 1);

        // Detaching an observer that was never attached changes nothing.
        camera.detach(&stranger_handle);
        assert_eq!(camera.observer_count(), 1);

        camera.detach(&attached_handle);
        camera.detach(&attached_handle);
        assert_eq!(camera.observer_count(), 0);
    }

    #[test]
    fn double_attach_doubles_delivery() {
        // Documented caller error: the protocol does not dedupe.
        let mut camera = Camera::new(Vec3::ZERO);
        let obs = counting();
        let handle: ObserverHandle = obs.clone();
        camera.attach(&handle);
        camera.attach(&handle);

        camera.set_yaw(45.0);
        assert_eq!(obs.borrow().camera_updates, 2);
    }

    #[test]
    fn dropped_observer_is_skipped() {
        let mut camera = Camera::new(Vec3::ZERO);
        let keeper = counting();
        let keeper_handle: ObserverHandle = keeper.clone();
        camera.attach(&keeper_handle);
        {
            let transient = counting();
            let transient_handle: ObserverHandle = transient.clone();
            camera.attach(&transient_handle);
            assert_eq!(camera.observer_count(), 2);
        }
        // The transient observer is gone; notification must not fail.
        camera.set_pitch(10.0);
        assert_eq!(camera.observer_count(), 1);
        assert_eq!(keeper.borrow().camera_updates, 1);
    }

    #[test]
    fn projection_mutations_tag_projection() {
        let mut camera = Camera::new(Vec3::ZERO);
        let obs = counting();
        let handle: ObserverHandle = obs.clone();
        camera.attach(&handle);

        camera.process_mouse_scroll(1.0);
        assert_eq!(obs.borrow().last_change, Some(ChangeType::Projection));

        camera.set_position(Vec3::X);
        assert_eq!(obs.borrow().last_change, Some(ChangeType::View));
    }

    #[test]
    fn light_setters_notify() {
        let mut light = Light::point(Vec3::ZERO, Vec3::ONE);
        let obs = counting();
        let handle: ObserverHandle = obs.clone();
        light.attach(&handle);

        light.set_color(Vec3::new(1.0, 0.0, 0.0));
        light.set_ambient(0.5);
        light.set_diffuse(0.6);
        light.set_specular(0.7);
        assert_eq!(obs.borrow().light_updates, 4);
        assert_eq!(light.diffuse(), 0.6);
        assert_eq!(light.specular(), 0.7);
    }
}
