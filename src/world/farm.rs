use crate::collision::contact::Contact;
use crate::collision::pair::BodyPair;
use crate::collision::reporter;
use crate::integration::integrator;
use crate::objects::body::Body;
use crate::objects::seed::{CircularBodySeed, PolygonBodySeed};
use crate::objects::store::{BodyHandle, BodyStore};
use crate::shapes::{Circle, Polygon, Shape};
use crate::solver::contact_handler;

/// The world: owns every body and one [`BodyPair`] per unordered pair of
/// live bodies, and drives the tick.
///
/// Each [`Farm::update`] first integrates all bodies, then reports contacts
/// over the pair list, then resolves them. Bodies are grown from seed
/// parameter bundles and addressed through the returned handles.
pub struct Farm {
    store: BodyStore,
    // Live bodies and pairs, in insertion order. Contact resolution follows
    // pair insertion order (older pairs first).
    order: Vec<BodyHandle>,
    pairs: Vec<BodyPair>,
    contacts: Vec<Contact>,
}

impl Farm {
    pub fn new() -> Self {
        Self {
            store: BodyStore::new(),
            order: Vec::new(),
            pairs: Vec::new(),
            contacts: Vec::new(),
        }
    }

    /// Grows a circular body from the seed and pairs it with every existing
    /// body.
    ///
    /// Panics if the seed was given no mass: set a density, an explicit
    /// mass and moment of inertia, or make it static first.
    pub fn grow_circular(&mut self, seed: &CircularBodySeed) -> BodyHandle {
        assert_seeded_mass(seed.mass());
        let shape = Shape::Circle(Circle::new(seed.radius));
        let mut body = Body::new(shape, seed.mass(), seed.moment_of_inertia(), seed.restitution);
        body.set_position(seed.position);
        body.set_velocity(seed.velocity);
        body.set_angle(seed.angle);
        body.set_angular_velocity(seed.angular_velocity);
        self.adopt(body)
    }

    /// Grows a polygon body from the seed and pairs it with every existing
    /// body.
    ///
    /// Panics if the seed was given no mass (see [`Farm::grow_circular`]) or
    /// if its vertices do not form a convex counter-clockwise loop.
    pub fn grow_polygon(&mut self, seed: &PolygonBodySeed) -> BodyHandle {
        assert_seeded_mass(seed.mass());
        let shape = Shape::Polygon(Polygon::new(seed.relative_vertices.clone()));
        let mut body = Body::new(shape, seed.mass(), seed.moment_of_inertia(), seed.restitution);
        body.set_position(seed.position);
        body.set_velocity(seed.velocity);
        body.set_angle(seed.angle);
        body.set_angular_velocity(seed.angular_velocity);
        self.adopt(body)
    }

    fn adopt(&mut self, body: Body) -> BodyHandle {
        let handle = self.store.insert(body);
        for &other in &self.order {
            self.pairs.push(BodyPair::new(handle, other));
        }
        self.order.push(handle);
        handle
    }

    /// Removes the body and every pair containing it. Destroying an already
    /// destroyed body is a no-op.
    pub fn destroy(&mut self, handle: BodyHandle) {
        if self.store.remove(handle).is_some() {
            self.order.retain(|&other| other != handle);
            self.pairs.retain(|pair| !pair.contains(handle));
        }
    }

    /// Advances the simulation by `dt` seconds: integrate every body, report
    /// contacts over the pair list, resolve them in list order.
    pub fn update(&mut self, dt: f64) {
        assert!(
            dt > 0.0 && dt.is_finite(),
            "time step must be positive and finite, got {dt}"
        );

        for &handle in &self.order {
            if let Some(body) = self.store.get_mut(handle) {
                integrator::integrate(body, dt);
            }
        }

        self.contacts = reporter::report(&self.store, &self.pairs);
        contact_handler::handle_contacts(&mut self.store, &self.contacts);
    }

    /// The contacts reported by the most recent [`Farm::update`].
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn body_count(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.store.contains(handle)
    }

    /// Shared access to a body. Panics on a stale handle; use
    /// [`Farm::try_body`] when the body may have been destroyed.
    pub fn body(&self, handle: BodyHandle) -> &Body {
        match self.store.get(handle) {
            Some(body) => body,
            None => panic!("stale body handle: the body was destroyed"),
        }
    }

    /// Mutable access to a body. Panics on a stale handle.
    pub fn body_mut(&mut self, handle: BodyHandle) -> &mut Body {
        match self.store.get_mut(handle) {
            Some(body) => body,
            None => panic!("stale body handle: the body was destroyed"),
        }
    }

    pub fn try_body(&self, handle: BodyHandle) -> Option<&Body> {
        self.store.get(handle)
    }

    /// Live bodies with their handles, in insertion order.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body)> {
        self.order
            .iter()
            .filter_map(|&handle| self.store.get(handle).map(|body| (handle, body)))
    }
}

impl Default for Farm {
    fn default() -> Self {
        Self::new()
    }
}

fn assert_seeded_mass(mass: f64) {
    assert!(
        mass > 0.0,
        "seed has no mass: set a density, a mass and moment of inertia, or make it static"
    );
}
