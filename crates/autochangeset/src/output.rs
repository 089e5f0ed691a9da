use autochangeset_operations::operations::GenerateOutput;
use autochangeset_parse::render_changeset;

pub(crate) fn print_dry_run(output: &GenerateOutput) {
    if output.changed.is_empty() {
        println!("No changesets to generate.");
        return;
    }

    for (index, package) in output.changed.iter().enumerate() {
        if index > 0 {
            println!();
        }
        println!("# {} ({})", package.name, package.bump);
        print!("{}", render_changeset(&package.to_changeset()));
    }
}

pub(crate) fn print_summary(output: &GenerateOutput) {
    if output.written.is_empty() && output.failed.is_empty() {
        println!("No changesets generated.");
        return;
    }

    if !output.written.is_empty() {
        println!("Generated changesets:");
        for path in &output.written {
            println!("  {}", path.display());
        }
    }

    if !output.failed.is_empty() {
        println!("Failed to write changesets for:");
        for name in &output.failed {
            println!("  {name}");
        }
    }
}
