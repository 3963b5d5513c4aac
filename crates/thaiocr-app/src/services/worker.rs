// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Background OCR worker.
//
// Processing runs on one dedicated thread so an event loop on the calling
// thread stays responsive. Results come back over an mpsc channel. A
// `WorkerSlot` holds the single current worker; starting a new one replaces
// the reference without cancelling the old thread.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;

use thaiocr_core::OcrConfig;
use thaiocr_core::error::OcrError;
use thaiocr_core::types::Progress;
use thaiocr_document::DocumentProcessor;
use tracing::{debug, info, warn};

/// What a worker should do.
#[derive(Debug, Clone)]
pub struct OcrJob {
    pub config: OcrConfig,
    pub input: PathBuf,
    /// Also write the text here, creating parent directories.
    pub output: Option<PathBuf>,
}

/// Messages sent from the worker thread.
#[derive(Debug)]
pub enum WorkerEvent {
    Progress(Progress),
    /// The rendered text of the whole document.
    Finished(String),
    Failed(OcrError),
}

/// Handle to one running worker thread.
pub struct OcrWorker {
    id: u64,
    events: Receiver<WorkerEvent>,
    handle: Option<JoinHandle<()>>,
}

impl OcrWorker {
    /// Start processing `job` on a new thread.
    pub fn spawn(id: u64, job: OcrJob) -> std::io::Result<Self> {
        let (tx, events) = mpsc::channel();
        let handle = std::thread::Builder::new()
            .name(format!("ocr-worker-{id}"))
            .spawn(move || run_job(job, tx))?;
        info!(id, "OCR worker started");
        Ok(Self {
            id,
            events,
            handle: Some(handle),
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Block until the job ends, passing progress to `on_progress`.
    pub fn wait(mut self, mut on_progress: impl FnMut(Progress)) -> Result<String, OcrError> {
        let mut outcome = None;
        for event in self.events.iter() {
            match event {
                WorkerEvent::Progress(progress) => on_progress(progress),
                WorkerEvent::Finished(text) => outcome = Some(Ok(text)),
                WorkerEvent::Failed(err) => outcome = Some(Err(err)),
            }
        }

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!(id = self.id, "OCR worker panicked");
            }
        }

        outcome.unwrap_or_else(|| {
            Err(OcrError::Document(Box::new(OcrError::Config(
                "worker stopped without a result".into(),
            ))))
        })
    }
}

fn run_job(job: OcrJob, tx: Sender<WorkerEvent>) {
    let progress_tx = tx.clone();
    let report = move |progress: Progress| {
        // The receiver is gone once the worker has been superseded.
        let _ = progress_tx.send(WorkerEvent::Progress(progress));
    };

    let result = DocumentProcessor::new(job.config)
        .map_err(OcrError::into_document)
        .and_then(|processor| match &job.output {
            Some(output) => processor
                .process_document_with_progress(&job.input, output, report)
                .map(|extracted| extracted.render()),
            None => processor
                .extract(&job.input, report)
                .map(|extracted| extracted.render())
                .map_err(OcrError::into_document),
        });

    let event = match result {
        Ok(text) => WorkerEvent::Finished(text),
        Err(err) => WorkerEvent::Failed(err),
    };
    if tx.send(event).is_err() {
        debug!("result dropped, worker was superseded");
    }
}

/// Holds the one worker a front-end is currently watching.
#[derive(Default)]
pub struct WorkerSlot {
    current: Option<OcrWorker>,
    next_id: u64,
}

impl WorkerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new worker, replacing the current one.
    ///
    /// The previous worker is not cancelled; it runs to completion and its
    /// events are discarded.
    pub fn start(&mut self, job: OcrJob) -> std::io::Result<&OcrWorker> {
        self.next_id += 1;
        let worker = OcrWorker::spawn(self.next_id, job)?;
        if let Some(previous) = self.current.take() {
            debug!(id = previous.id(), "superseding running worker");
        }
        Ok(&*self.current.insert(worker))
    }

    #[cfg(test)]
    pub fn current(&self) -> Option<&OcrWorker> {
        self.current.as_ref()
    }

    /// Remove and return the current worker.
    pub fn take(&mut self) -> Option<OcrWorker> {
        self.current.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(input: &str) -> OcrJob {
        OcrJob {
            config: OcrConfig::default().with_tesseract_path("/nonexistent/tesseract"),
            input: PathBuf::from(input),
            output: None,
        }
    }

    #[test]
    fn missing_engine_is_reported_as_failure() {
        let worker = OcrWorker::spawn(1, job("scan.png")).unwrap();
        let err = worker.wait(|_| {}).unwrap_err();
        assert!(err.is_missing_dependency());
        assert!(err.to_string().starts_with("Error processing document:"));
    }

    #[test]
    fn slot_replaces_current_worker() {
        let mut slot = WorkerSlot::new();
        let first = slot.start(job("a.png")).unwrap().id();
        let second = slot.start(job("b.png")).unwrap().id();
        assert_ne!(first, second);
        assert_eq!(slot.current().map(OcrWorker::id), Some(second));

        let worker = slot.take().unwrap();
        assert!(worker.wait(|_| {}).is_err());
        assert!(slot.current().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn finished_text_and_progress() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("tesseract");
        std::fs::write(
            &bin,
            "#!/bin/sh\nif [ \"$1\" = \"--version\" ]; then echo tesseract 5.3.4; exit 0; fi\necho ข้อความ\n",
        )
        .unwrap();
        std::fs::set_permissions(&bin, std::fs::Permissions::from_mode(0o755)).unwrap();

        // The image is decoded before OCR, so it must be a real PNG.
        let input = dir.path().join("scan.png");
        image::RgbImage::from_pixel(2, 2, image::Rgb([255, 255, 255]))
            .save(&input)
            .unwrap();
        let output = dir.path().join("out").join("scan.txt");

        let worker = OcrWorker::spawn(
            7,
            OcrJob {
                config: OcrConfig::default().with_tesseract_path(&bin),
                input,
                output: Some(output.clone()),
            },
        )
        .unwrap();

        let mut seen = Vec::new();
        let text = worker.wait(|p| seen.push(p)).unwrap();
        assert_eq!(text, "ข้อความ");
        assert_eq!(std::fs::read_to_string(output).unwrap(), "ข้อความ");
        assert!(seen.contains(&Progress::Page { current: 1, total: 1 }));
    }
}
