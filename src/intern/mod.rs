pub mod intern_models;
pub mod intern_dto;
pub mod intern_repository;
pub mod intern_handlers;
pub mod intern_service;
pub mod intern_wizard;

pub use intern_models::{Intern, InternStatus, InternWithStats, TaskStats};
pub use intern_dto::{
    CreateInternRequest, InternListQuery, InternsListResponse, UpdateInternRequest,
    UpdateInternStatusRequest,
};
pub use intern_repository::InternRepository;
pub use intern_handlers::{
    create_intern, delete_intern, get_intern, get_interns, update_intern, update_intern_status,
    validate_wizard_step,
};
pub use intern_service::InternService;
pub use intern_wizard::{InternDraft, WizardStep, WizardValidateRequest, WizardValidateResponse};
