// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// focaldist - Find the closest focal sequence for every context sequence
pub struct Args {
    /// path to the context alignment FASTA
    #[argh(option)]
    pub alignment: Option<String>,

    /// path to the reference FASTA (exactly one sequence)
    #[argh(option)]
    pub reference: Option<String>,

    /// path to the focal alignment FASTA
    #[argh(option)]
    pub focal_alignment: Option<String>,

    /// output TSV file (strain, closest strain, distance)
    #[argh(option)]
    pub output: Option<String>,

    /// sequence identifier to exclude from the focal set (repeatable)
    #[argh(option)]
    pub ignore_seqs: Vec<String>,

    /// number of context sequences processed per chunk (default: 10000)
    #[argh(option, default = "10000")]
    pub chunk_size: usize,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}
