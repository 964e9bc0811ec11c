/// Runs several tasks into one status with the same merging rules as
/// [`CompositeTask`](crate::CompositeTask).
///
/// Handy for a task made of sub-systems that are fields of the same struct.
#[macro_export]
macro_rules! run_diagnostics {
    ($status: expr, $($tasks:expr),*) => {
        {
            let mut runner = $crate::CompositeTaskRunner::new($status);
            $(
                runner.run(&$tasks);
            )*
            runner.finish();
        }
    };
}
