use crate::task::run_isolated;
use crate::{Level, Status, Task, TaskResult};
use std::sync::Arc;

/// Task merging the results of several child tasks.
///
/// The combined level is the most severe child level, and the children's
/// values are concatenated in the order the children were added. Children are
/// shared, so the same task can also be registered on its own elsewhere.
pub struct CompositeTask {
    name: String,
    tasks: Vec<Arc<dyn Task>>,
}

impl CompositeTask {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            tasks: vec![],
        }
    }

    /// Appends a child task.
    ///
    /// Tasks are not deduplicated: adding the same task twice runs it twice.
    pub fn add_task(&mut self, task: impl Task + 'static) {
        self.tasks.push(Arc::new(task))
    }

    /// Appends a child task that is also held somewhere else.
    pub fn add_shared(&mut self, task: Arc<dyn Task>) {
        self.tasks.push(task)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Task for CompositeTask {
    #[inline]
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, status: &mut Status) -> TaskResult {
        if self.tasks.is_empty() {
            status.set_summary(Level::Error, "no subtasks registered");
            return Ok(());
        }

        let mut runner = CompositeTaskRunner::new(status);
        for task in &self.tasks {
            runner.run(task.as_ref());
        }
        runner.finish();
        Ok(())
    }
}

/// Runs tasks one after another against a shared status.
///
/// Every task starts from the summary the target had when the runner was
/// created, and the merged summary is written back when the runner finishes
/// or is dropped.
pub struct CompositeTaskRunner<'a> {
    level: Level,
    message: String,
    target: &'a mut Status,
    combination: Status,
    finished: bool,
}

impl<'a> Drop for CompositeTaskRunner<'a> {
    fn drop(&mut self) {
        self.apply_summary()
    }
}

impl<'a> CompositeTaskRunner<'a> {
    pub fn new(target: &'a mut Status) -> Self {
        Self {
            level: target.level,
            message: target.message.clone(),
            target,
            combination: Status::default(),
            finished: false,
        }
    }

    pub fn run(&mut self, task: &dyn Task) {
        self.target.set_summary(self.level, &self.message);
        run_isolated(task, self.target);
        self.combination.merge_summary_with(self.target);
    }

    pub fn finish(mut self) {
        self.apply_summary()
    }

    fn apply_summary(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        self.target.copy_summary(&self.combination);
    }
}
