mod queue_dao;

pub use queue_dao::QueueDao;
