//! In-process fakes for the service seams, used by router tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use medic_core::{
    Analysis, Condition, ConsultError, ConsultationStore, DoctorFinder, DoctorRecord, GeoPoint,
    HealthcareTips, NewConsultation, SymptomAnalyzer,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::ServerState;

#[derive(Default)]
pub struct FakeAnalyzer {
    pub conditions: Vec<String>,
    /// Top-level reply fields besides `conditions`; defaults when empty.
    pub extra: Option<Value>,
    pub fail_analysis: bool,
    pub fail_tips: bool,
    pub analyze_calls: AtomicUsize,
    pub tips_requests: Mutex<Vec<Vec<String>>>,
}

impl FakeAnalyzer {
    pub fn with_conditions(names: &[&str]) -> Self {
        Self {
            conditions: names.iter().map(|n| n.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.analyze_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SymptomAnalyzer for FakeAnalyzer {
    async fn analyze(&self, _symptoms: &str) -> Result<Analysis, ConsultError> {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_analysis {
            return Err(ConsultError::Analysis("model unavailable".into()));
        }
        let extra = self.extra.clone().unwrap_or_else(|| {
            json!({"severity": "Low", "immediate_attention": false, "first_aid": ["Rest"]})
        });
        let details = match extra {
            Value::Object(map) => map,
            _ => Default::default(),
        };
        Ok(Analysis {
            conditions: self
                .conditions
                .iter()
                .map(|name| {
                    let mut condition = Condition::named(name.clone());
                    condition.details.insert("likelihood".into(), json!("High"));
                    condition
                })
                .collect(),
            details,
        })
    }

    async fn healthcare_tips(
        &self,
        conditions: &[String],
        _symptoms: &str,
    ) -> Result<HealthcareTips, ConsultError> {
        self.tips_requests.lock().unwrap().push(conditions.to_vec());
        if self.fail_tips {
            return Err(ConsultError::Tips("bad reply".into()));
        }
        Ok(vec![json!("Stay hydrated")])
    }
}

#[derive(Default)]
pub struct FakeFinder {
    pub fail: bool,
    pub calls: Mutex<Vec<(GeoPoint, Option<String>)>>,
}

impl FakeFinder {
    pub fn specialties(&self) -> Vec<Option<String>> {
        self.calls.lock().unwrap().iter().map(|(_, s)| s.clone()).collect()
    }
}

#[async_trait]
impl DoctorFinder for FakeFinder {
    async fn find_nearby(
        &self,
        point: GeoPoint,
        specialty: Option<&str>,
    ) -> Result<Vec<DoctorRecord>, ConsultError> {
        self.calls.lock().unwrap().push((point, specialty.map(String::from)));
        if self.fail {
            return Err(ConsultError::DoctorLookup("connection reset".into()));
        }
        Ok(vec![json!({"name": "City Clinic", "vicinity": "MG Road"})])
    }
}

#[derive(Default)]
pub struct FakeStore {
    pub fail: bool,
    pub writes: Mutex<Vec<NewConsultation>>,
}

#[async_trait]
impl ConsultationStore for FakeStore {
    async fn create(&self, consultation: NewConsultation) -> Result<String, ConsultError> {
        if self.fail {
            return Err(ConsultError::Persistence("disk full".into()));
        }
        let mut writes = self.writes.lock().unwrap();
        writes.push(consultation);
        Ok(format!("consultation-{}", writes.len()))
    }
}

/// Fakes plus a router wired to them.
pub struct Harness {
    pub analyzer: Arc<FakeAnalyzer>,
    pub finder: Arc<FakeFinder>,
    pub store: Arc<FakeStore>,
}

impl Harness {
    pub fn new(analyzer: FakeAnalyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            finder: Arc::new(FakeFinder::default()),
            store: Arc::new(FakeStore::default()),
        }
    }

    pub fn with_finder(mut self, finder: FakeFinder) -> Self {
        self.finder = Arc::new(finder);
        self
    }

    pub fn with_store(mut self, store: FakeStore) -> Self {
        self.store = Arc::new(store);
        self
    }

    pub fn app(&self) -> Router {
        crate::app(Arc::new(ServerState {
            max_symptom_length: 1000,
            analyzer: self.analyzer.clone(),
            doctors: self.finder.clone(),
            store: self.store.clone(),
        }))
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let response = self.app().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}
