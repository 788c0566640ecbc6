//! Body descriptors and the solar-system catalog.

use anyhow::{Result, bail, ensure};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyKind {
    Star,
    Planet,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextureSet {
    pub surface: String,
    /// Transparent overlay sphere (clouds, atmosphere)
    pub atmosphere: Option<String>,
}

/// Planetary ring parameters. Only constructible with `0 < inner < outer`.
#[derive(Clone, Debug, PartialEq)]
pub struct RingDescriptor {
    inner_radius: f32,
    outer_radius: f32,
    texture: String,
}

impl RingDescriptor {
    pub fn new(inner_radius: f32, outer_radius: f32, texture: impl Into<String>) -> Result<Self> {
        let ring = Self {
            inner_radius,
            outer_radius,
            texture: texture.into(),
        };
        ring.validate()?;
        Ok(ring)
    }

    pub fn inner_radius(&self) -> f32 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f32 {
        self.outer_radius
    }

    pub fn texture(&self) -> &str {
        &self.texture
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.inner_radius > 0.0,
            "ring inner radius must be positive (got {})",
            self.inner_radius
        );
        ensure!(
            self.inner_radius < self.outer_radius,
            "ring inner radius {} must be smaller than outer radius {}",
            self.inner_radius,
            self.outer_radius
        );
        Ok(())
    }
}

/// Per-tick rotation increments, in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionRates {
    pub spin: f32,
    /// Orbital revolution; stars don't revolve
    pub revolution: Option<f32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CelestialBodyDescriptor {
    pub name: String,
    pub kind: BodyKind,
    pub radius: f32,
    pub textures: TextureSet,
    /// Unscaled distance from the sun
    pub orbital_distance: f32,
    pub ring: Option<RingDescriptor>,
    pub rates: MotionRates,
    pub description: String,
}

impl CelestialBodyDescriptor {
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.name.trim().is_empty(), "body name must not be empty");
        ensure!(
            self.radius > 0.0,
            "{}: radius must be positive (got {})",
            self.name,
            self.radius
        );
        if self.textures.surface.is_empty() {
            bail!("{}: surface texture is required", self.name);
        }
        match self.kind {
            BodyKind::Planet => {
                ensure!(
                    self.orbital_distance > 0.0,
                    "{}: orbital distance must be positive (got {})",
                    self.name,
                    self.orbital_distance
                );
                ensure!(
                    self.rates.revolution.is_some(),
                    "{}: planets need a revolution rate",
                    self.name
                );
            }
            BodyKind::Star => {
                ensure!(
                    self.ring.is_none(),
                    "{}: stars cannot carry rings",
                    self.name
                );
            }
        }
        if let Some(ring) = &self.ring {
            ring.validate()?;
        }
        Ok(())
    }
}

#[allow(clippy::too_many_arguments)]
fn planet(
    name: &str,
    radius: f32,
    surface: &str,
    atmosphere: Option<&str>,
    orbital_distance: f32,
    ring: Option<RingDescriptor>,
    (spin, revolution): (f32, f32),
    description: &str,
) -> CelestialBodyDescriptor {
    CelestialBodyDescriptor {
        name: name.to_owned(),
        kind: BodyKind::Planet,
        radius,
        textures: TextureSet {
            surface: surface.to_owned(),
            atmosphere: atmosphere.map(str::to_owned),
        },
        orbital_distance,
        ring,
        rates: MotionRates {
            spin,
            revolution: Some(revolution),
        },
        description: description.to_owned(),
    }
}

pub fn sun() -> CelestialBodyDescriptor {
    CelestialBodyDescriptor {
        name: "sun".to_owned(),
        kind: BodyKind::Star,
        radius: 24.0,
        textures: TextureSet {
            surface: "sun.jpg".to_owned(),
            atmosphere: None,
        },
        orbital_distance: 0.0,
        ring: None,
        rates: MotionRates {
            spin: 0.0004,
            revolution: None,
        },
        description: "The star at the centre of the system. It holds 99.8% of the \
                      system's mass and its light reaches Earth in about eight minutes."
            .to_owned(),
    }
}

/// The eight planets, innermost first.
pub fn planets() -> Result<Vec<CelestialBodyDescriptor>> {
    Ok(vec![
        planet(
            "mercury",
            3.2,
            "mercury.jpg",
            None,
            28.0,
            None,
            (0.0004, 0.004),
            "The smallest planet and the closest to the sun. A year lasts 88 days.",
        ),
        planet(
            "venus",
            5.8,
            "venus_surface.jpg",
            Some("venus_atmosphere.jpg"),
            44.0,
            None,
            (0.0002, 0.0015),
            "Wrapped in thick sulfuric clouds, Venus is the hottest planet and spins backwards.",
        ),
        planet(
            "earth",
            6.0,
            "earth.png",
            Some("clouds.jpg"),
            62.0,
            None,
            (0.002, 0.001),
            "Our home. The only known world with liquid water on its surface and life.",
        ),
        planet(
            "mars",
            4.0,
            "mars.jpg",
            None,
            78.0,
            None,
            (0.0018, 0.0008),
            "The red planet, home to Olympus Mons, the tallest volcano in the solar system.",
        ),
        planet(
            "jupiter",
            12.0,
            "jupiter.jpg",
            None,
            100.0,
            None,
            (0.004, 0.0002),
            "The largest planet. Its Great Red Spot is a storm wider than Earth.",
        ),
        planet(
            "saturn",
            10.0,
            "saturn.jpg",
            None,
            138.0,
            Some(RingDescriptor::new(10.0, 20.0, "saturn_ring.png")?),
            (0.0038, 0.00009),
            "A gas giant famous for its bright rings of ice and rock.",
        ),
        planet(
            "uranus",
            7.0,
            "uranus.jpg",
            None,
            176.0,
            Some(RingDescriptor::new(7.0, 12.0, "uranus_ring.png")?),
            (0.003, 0.00004),
            "An ice giant that rotates on its side, tilted by almost 98 degrees.",
        ),
        planet(
            "neptune",
            7.0,
            "neptune.jpg",
            None,
            200.0,
            None,
            (0.0032, 0.00001),
            "The windiest planet, with storms faster than the speed of sound.",
        ),
    ])
}

/// Sun first, then the planets in orbital order.
pub fn solar_system() -> Result<Vec<CelestialBodyDescriptor>> {
    let mut bodies = vec![sun()];
    bodies.extend(planets()?);
    Ok(bodies)
}
