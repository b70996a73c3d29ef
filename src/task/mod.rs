pub mod task_models;
pub mod task_dto;
pub mod task_repository;
pub mod task_handlers;
pub mod task_service;
pub mod overdue_job;

pub use task_models::{Task, TaskStatus};
pub use task_dto::{CreateTaskRequest, TaskListQuery, UpdateTaskRequest};
pub use task_repository::TaskRepository;
pub use task_handlers::{
    complete_task, create_task, delete_task, get_intern_tasks, get_task, update_task,
};
pub use task_service::TaskService;
pub use overdue_job::start_overdue_job;
