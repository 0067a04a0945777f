use std::{ops::Deref, sync::Arc};

use crate::{error::ErrorVerbosity, store::BookStore, traits::StateProvider};

#[derive(Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    pub fn new(error_verbosity: ErrorVerbosity, store: Arc<dyn BookStore>) -> Self {
        Self {
            inner: Arc::new(ApiStateInner {
                error_verbosity,
                store,
            }),
        }
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub struct ApiStateInner {
    error_verbosity: ErrorVerbosity,
    store: Arc<dyn BookStore>,
}

impl ApiStateInner {
    pub fn error_verbosity(&self) -> ErrorVerbosity {
        self.error_verbosity
    }

    pub fn store(&self) -> &dyn BookStore {
        self.store.as_ref()
    }
}

impl StateProvider for ApiState {
    fn error_verbosity(&self) -> ErrorVerbosity {
        self.inner.error_verbosity
    }
}
