use crate::location::{City, LocationTable, State};
use crate::post::Post;
use crate::service::Service;
use crate::slug::{Slug, ValidationError};
use std::collections::BTreeMap;
use std::path::Path;

/// Read-only view over the static content tables. Loaded once at startup,
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ContentStore {
    states: Vec<State>,
    cities: BTreeMap<Slug, City>,
    services: Vec<Service>,
    posts: Vec<Post>,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ValidationError> {
    let bytes = std::fs::read(path)
        .map_err(|e| ValidationError(format!("read {} failed: {e}", path.display())))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| ValidationError(format!("parse {} failed: {e}", path.display())))
}

impl ContentStore {
    pub fn load_from_dir(dir: &Path) -> Result<Self, ValidationError> {
        let locations: LocationTable = read_json(&dir.join("locations.json"))?;
        let services: Vec<Service> = read_json(&dir.join("services.json"))?;
        let posts: Vec<Post> = read_json(&dir.join("posts.json"))?;
        Self::from_parts(locations, services, posts)
    }

    pub fn from_parts(
        locations: LocationTable,
        services: Vec<Service>,
        posts: Vec<Post>,
    ) -> Result<Self, ValidationError> {
        let store = Self {
            states: locations.states,
            cities: locations.cities,
            services,
            posts,
        };
        store.validate()?;
        Ok(store)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let mut state_slugs = BTreeMap::new();
        for state in &self.states {
            Slug::parse(state.slug.as_str())?;
            if state_slugs.insert(state.slug.clone(), ()).is_some() {
                return Err(ValidationError(format!(
                    "duplicate state slug: {}",
                    state.slug
                )));
            }
        }

        // Every referenced city must exist, and every city must belong to
        // exactly one state.
        let mut referenced: BTreeMap<&Slug, u32> = BTreeMap::new();
        for state in &self.states {
            for city in &state.cities {
                if !self.cities.contains_key(city) {
                    return Err(ValidationError(format!(
                        "state {} references unknown city: {city}",
                        state.slug
                    )));
                }
                *referenced.entry(city).or_insert(0) += 1;
            }
        }
        for city in self.cities.keys() {
            Slug::parse(city.as_str())?;
            match referenced.get(city).copied().unwrap_or(0) {
                0 => {
                    return Err(ValidationError(format!(
                        "city {city} is not referenced by any state"
                    )))
                }
                1 => {}
                n => {
                    return Err(ValidationError(format!(
                        "city {city} is referenced by {n} states; cities belong to exactly one state"
                    )))
                }
            }
        }

        let mut service_slugs = BTreeMap::new();
        for service in &self.services {
            Slug::parse(service.slug.as_str())?;
            if service_slugs.insert(service.slug.clone(), ()).is_some() {
                return Err(ValidationError(format!(
                    "duplicate service slug: {}",
                    service.slug
                )));
            }
        }

        let mut post_slugs = BTreeMap::new();
        for post in &self.posts {
            Slug::parse(post.slug.as_str())?;
            if post_slugs.insert(post.slug.clone(), ()).is_some() {
                return Err(ValidationError(format!("duplicate post slug: {}", post.slug)));
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn states(&self) -> &[State] {
        &self.states
    }

    #[must_use]
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    #[must_use]
    pub fn state(&self, slug: &str) -> Option<&State> {
        self.states.iter().find(|s| s.slug.as_str() == slug)
    }

    /// Resolves a city only through its owning state: the city slug must
    /// appear in the state's city list.
    #[must_use]
    pub fn city_in_state(&self, state: &str, city: &str) -> Option<(&State, &City)> {
        let state = self.state(state)?;
        let slug = state.cities.iter().find(|c| c.as_str() == city)?;
        let city = self.cities.get(slug)?;
        Some((state, city))
    }

    #[must_use]
    pub fn cities_of<'a>(&'a self, state: &'a State) -> Vec<(&'a Slug, &'a City)> {
        state
            .cities
            .iter()
            .filter_map(|slug| self.cities.get(slug).map(|city| (slug, city)))
            .collect()
    }

    #[must_use]
    pub fn service(&self, slug: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.slug.as_str() == slug)
    }

    #[must_use]
    pub fn post(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug.as_str() == slug)
    }
}
