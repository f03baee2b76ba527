pub mod chart;
pub mod dto;
pub mod summary;
pub mod synthesis_service;
