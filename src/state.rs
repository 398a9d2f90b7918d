//! Shared application state

use std::sync::Arc;

use crate::catalog::actor::Actor;
use crate::catalog::cinema::Cinema;
use crate::catalog::genre::Genre;
use crate::catalog::movie::Movie;
use crate::catalog::review::Review;
use crate::config::Config;
use crate::resource::ResourceOps;
use crate::store::MemTable;

/// Per-process state handed to every handler
///
/// Tables are cheap to clone; they share storage through an `Arc` internally.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub movies: MemTable<Movie>,
    pub actors: MemTable<Actor>,
    pub genres: MemTable<Genre>,
    pub cinemas: MemTable<Cinema>,
    pub reviews: MemTable<Review>,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            movies: MemTable::new(),
            actors: MemTable::new(),
            genres: MemTable::new(),
            cinemas: MemTable::new(),
            reviews: MemTable::new(),
        }
    }

    pub fn movie_ops(&self) -> ResourceOps<Movie, MemTable<Movie>> {
        ResourceOps::new(self.movies.clone())
    }

    pub fn actor_ops(&self) -> ResourceOps<Actor, MemTable<Actor>> {
        ResourceOps::new(self.actors.clone())
    }

    pub fn genre_ops(&self) -> ResourceOps<Genre, MemTable<Genre>> {
        ResourceOps::new(self.genres.clone())
    }

    pub fn cinema_ops(&self) -> ResourceOps<Cinema, MemTable<Cinema>> {
        ResourceOps::new(self.cinemas.clone())
    }
}
