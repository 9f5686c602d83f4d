use std::sync::Arc;

use hypr_caption::{CueEditor, CueSource, SaveOutcome};

use crate::runtime::VaultRuntime;

pub struct Args {
    pub job_id: String,
    pub index: usize,
    pub text: String,
}

/// Replace one cue's text, reflow its word timing and write the job back.
pub async fn run(runtime: &VaultRuntime, args: Args) -> anyhow::Result<()> {
    // The editor treats an unreadable transcript as empty, so check it here
    // first to report the actual storage error.
    let count = runtime
        .load(&args.job_id)
        .await
        .map_err(|e| anyhow::anyhow!(e))?
        .len();
    if args.index >= count {
        anyhow::bail!(
            "cue #{} does not exist in job {} ({count} cues)",
            args.index,
            args.job_id
        );
    }

    let editor = CueEditor::new(Arc::new(runtime.clone()));
    editor.open_job(&args.job_id, runtime).await;

    if !editor.begin_edit(args.index).await {
        anyhow::bail!("cue #{} cannot be edited right now", args.index);
    }
    editor.update_draft(args.text).await;

    let Some(task) = editor.save_edit().await else {
        anyhow::bail!("nothing to save");
    };

    match task.await? {
        SaveOutcome::Saved => {}
        SaveOutcome::Failed(message) => anyhow::bail!(message),
        SaveOutcome::Discarded => anyhow::bail!("save was superseded"),
    }

    let snapshot = editor.snapshot().await;
    let cue = &snapshot.cues[args.index];
    tracing::info!(job_id = %args.job_id, index = args.index, "cue_saved");
    println!("#{} [{:.2} - {:.2}] {}", args.index, cue.start, cue.end, cue.text);
    Ok(())
}
