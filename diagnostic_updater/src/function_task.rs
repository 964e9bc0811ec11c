use crate::{Status, Task, TaskError, TaskResult};
use std::marker::PhantomData;

/// Return types accepted from functions wrapped into a [`FunctionTask`].
///
/// Plain functions returning `()` never fail. Functions returning a
/// `Result<(), E>` fail with the error's `Display` text.
pub trait IntoTaskResult {
    fn into_task_result(self) -> TaskResult;
}

impl IntoTaskResult for () {
    #[inline]
    fn into_task_result(self) -> TaskResult {
        Ok(())
    }
}

impl<E: std::fmt::Display> IntoTaskResult for Result<(), E> {
    #[inline]
    fn into_task_result(self) -> TaskResult {
        self.map_err(TaskError::new)
    }
}

/// Adapter turning a function or closure into a named [`Task`].
pub struct FunctionTask<F, R = ()>
where
    F: Fn(&mut Status) -> R,
{
    name: String,
    function: F,
    _result: PhantomData<fn() -> R>,
}

impl<F, R> FunctionTask<F, R>
where
    F: Fn(&mut Status) -> R,
{
    #[inline]
    pub fn new(name: &str, function: F) -> Self {
        Self {
            name: name.into(),
            function,
            _result: PhantomData,
        }
    }
}

impl<F, R> Clone for FunctionTask<F, R>
where
    F: Fn(&mut Status) -> R + Clone,
{
    fn clone(&self) -> Self {
        Self::new(&self.name, self.function.clone())
    }
}

impl<F, R> Task for FunctionTask<F, R>
where
    F: Fn(&mut Status) -> R + Send + Sync,
    R: IntoTaskResult,
{
    #[inline]
    fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    fn run(&self, status: &mut Status) -> TaskResult {
        (self.function)(status).into_task_result()
    }
}

pub trait FunctionExt<R>: Sized + Fn(&mut Status) -> R {
    fn into_task(self, name: &str) -> FunctionTask<Self, R>;
}

impl<F, R> FunctionExt<R> for F
where
    F: Fn(&mut Status) -> R,
{
    #[inline]
    fn into_task(self, name: &str) -> FunctionTask<Self, R> {
        FunctionTask::new(name, self)
    }
}
