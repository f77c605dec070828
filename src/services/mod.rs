pub mod answer_service;
pub mod assessment_service;
pub mod builder_service;
pub mod candidate_service;
pub mod dashboard_service;
pub mod job_service;
pub mod order_engine;
