use folio_core_contact_impl::ContactFeatureServiceImpl;
use folio_core_health_impl::HealthFeatureServiceImpl;
use folio_persistence_postgres::{contact::PostgresContactRepository, PostgresDatabase};
use folio_shared_impl::time::TimeServiceImpl;

// API
pub type RestServer = folio_api_rest::RestServer<HealthFeature, ContactFeature>;

// Persistence
pub type Database = PostgresDatabase;

// Shared
pub type Time = TimeServiceImpl;

// Repositories
pub type ContactRepo = PostgresContactRepository;

// Core
pub type HealthFeature = HealthFeatureServiceImpl<Time, Database>;

pub type ContactFeature = ContactFeatureServiceImpl<Database, ContactRepo>;
