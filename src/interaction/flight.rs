//! Camera flights toward a picked body.
//!
//! A flight linearly interpolates the camera position over a fixed duration
//! while keeping the pan-orbit focus on the target. Only one flight runs at a
//! time: starting a new one cancels the previous.

use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;

use crate::ui::MainCamera;

pub const FLIGHT_DURATION_SECS: f32 = 1.5;

/// Where the camera should end up to frame a box with the given center and size
pub fn framing_position(center: Vec3, size: Vec3) -> Vec3 {
    Vec3::new(
        center.x - 2.0 * size.x,
        center.y + 2.0 * size.y,
        center.z + 2.0 * size.z,
    )
}

/// Convert a focus-relative offset into pan-orbit `(radius, yaw, pitch)`
pub fn orbit_parameters(offset: Vec3) -> (f32, f32, f32) {
    let radius = offset.length();
    if radius <= f32::EPSILON {
        return (0.0, 0.0, 0.0);
    }
    let direction = offset / radius;
    let pitch = direction.y.clamp(-1.0, 1.0).asin();
    let yaw = direction.x.atan2(direction.z);
    (radius, yaw, pitch)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlightSample {
    pub position: Vec3,
    pub focus: Vec3,
    pub finished: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraFlight {
    from: Vec3,
    to: Vec3,
    focus: Vec3,
    elapsed: f32,
    duration: f32,
}

impl CameraFlight {
    /// Fly from `from` to frame a box of `size` centred on `focus`
    pub fn new(from: Vec3, focus: Vec3, size: Vec3) -> Self {
        Self {
            from,
            to: framing_position(focus, size),
            focus,
            elapsed: 0.0,
            duration: FLIGHT_DURATION_SECS,
        }
    }

    /// Step the flight by `dt` seconds (linear easing)
    pub fn advance(&mut self, dt: f32) -> FlightSample {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        let t = if self.duration > 0.0 {
            self.elapsed / self.duration
        } else {
            1.0
        };
        FlightSample {
            position: self.from.lerp(self.to, t),
            focus: self.focus,
            finished: t >= 1.0,
        }
    }
}

/// Identifies one started flight
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FlightHandle(u64);

#[derive(Resource, Default)]
pub struct CameraFlights {
    active: Option<(FlightHandle, CameraFlight)>,
    next_id: u64,
}

impl CameraFlights {
    /// Start a flight, cancelling any flight still in progress
    pub fn start(&mut self, flight: CameraFlight) -> FlightHandle {
        let handle = FlightHandle(self.next_id);
        self.next_id += 1;
        self.active = Some((handle, flight));
        handle
    }

    pub fn current(&self) -> Option<FlightHandle> {
        self.active.as_ref().map(|(handle, _)| *handle)
    }

    /// Sample the running flight; finished flights are dropped after their last sample
    pub fn advance(&mut self, dt: f32) -> Option<FlightSample> {
        let (_, flight) = self.active.as_mut()?;
        let sample = flight.advance(dt);
        if sample.finished {
            self.active = None;
        }
        Some(sample)
    }
}

/// Move the camera along the running flight, re-aiming at the target every step
pub fn advance_camera_flight(
    time: Res<Time>,
    mut flights: ResMut<CameraFlights>,
    camera: Single<(&mut PanOrbitCamera, &mut Transform), With<MainCamera>>,
) {
    let Some(sample) = flights.advance(time.delta_secs()) else {
        return;
    };
    let (mut pan_orbit, mut transform) = camera.into_inner();

    let (radius, yaw, pitch) = orbit_parameters(sample.position - sample.focus);

    // Focus is shared with the orbit controls; keep both fields in step.
    pan_orbit.focus = sample.focus;
    pan_orbit.target_focus = sample.focus;
    pan_orbit.target_radius = radius;
    pan_orbit.target_yaw = yaw;
    pan_orbit.target_pitch = pitch;
    pan_orbit.radius = Some(radius);
    pan_orbit.yaw = Some(yaw);
    pan_orbit.pitch = Some(pitch);
    pan_orbit.force_update = true;

    transform.translation = sample.position;
    transform.look_at(sample.focus, Vec3::Y);

    if sample.finished {
        debug!("Camera flight finished at {:?}", sample.position);
    }
}
