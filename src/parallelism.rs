use crossbeam_channel::TryRecvError;
use log::trace;
use std::thread;

/// Number of worker threads to use when the caller does not say.
pub fn default_threads() -> usize {
    num_cpus::get()
}

/// Applies `runner` to every item, using up to `nthreads` threads.
///
/// Results come back in the order of `items`, whatever order the jobs ran in.
pub fn map_parallel<T, R, TRunner>(items: &[T], nthreads: usize, runner: TRunner) -> Vec<R>
where
    T: Sync,
    R: Send,
    TRunner: Fn(&T) -> R + Sync,
{
    let nthreads = nthreads.max(1).min(items.len());
    if nthreads <= 1 {
        return items.iter().map(&runner).collect();
    }
    let (s1, r1) = crossbeam_channel::unbounded();
    for job in 0..items.len() {
        s1.send(job).unwrap();
    }
    drop(s1);
    trace!(target: "mattr", "{} jobs, {nthreads} threads", items.len());
    let mut results: Vec<Option<R>> = (0..items.len()).map(|_| None).collect();
    thread::scope(|scope| {
        let (s2, r2) = crossbeam_channel::unbounded();
        for _ in 0..nthreads {
            let r1 = r1.clone();
            let s2 = s2.clone();
            let runner = &runner;
            scope.spawn(move || {
                loop {
                    match r1.try_recv() {
                        Ok(job) => {
                            s2.send((job, runner(&items[job]))).unwrap();
                        }
                        Err(TryRecvError::Empty) => unreachable!(),
                        Err(TryRecvError::Disconnected) => break,
                    }
                }
            });
        }
        drop(s2);
        while let Ok((job, result)) = r2.recv() {
            results[job] = Some(result);
        }
    });
    results
        .into_iter()
        .map(|r| r.expect("every job reports back"))
        .collect()
}
