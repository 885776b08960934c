use std::fs::{self, File};
use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use atari8_snapshot::{read_snapshot, MachineKind, MemoryState, Snapshot};
use clap::Parser;
use flate2::read::GzDecoder;

#[derive(Parser, Debug)]
#[command(
    name = "atari8-state-inspect",
    about = "Decode a gzip-enveloped ATARI800 save state and print its contents."
)]
struct Args {
    /// Input save-state file (gzip envelope)
    input: PathBuf,

    /// Write the 64 KiB main RAM image to this path
    #[arg(long, value_name = "PATH")]
    memory_out: Option<PathBuf>,

    /// Hex-dump the 256 bytes at the ANTIC display-list address
    #[arg(long, action = clap::ArgAction::SetTrue)]
    dlist: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let file = File::open(&args.input).with_context(|| format!("open {}", args.input.display()))?;
    let mut data = Vec::new();
    GzDecoder::new(file)
        .read_to_end(&mut data)
        .with_context(|| format!("decompress {}", args.input.display()))?;

    let snapshot =
        read_snapshot(&data).with_context(|| format!("decode {}", args.input.display()))?;
    print_summary(&snapshot);

    if let Some(path) = &args.memory_out {
        let ram = &snapshot.cpu.memory.data;
        fs::write(path, ram).with_context(|| format!("write {}", path.display()))?;
        eprintln!("wrote {} ({} bytes)", path.display(), ram.len());
    }

    if args.dlist {
        dump_dlist(&snapshot);
    }

    Ok(())
}

fn print_summary(snapshot: &Snapshot) {
    println!("version: {}  verbose: {}", snapshot.version, snapshot.verbose);

    let machine = &snapshot.machine;
    let kind = match machine.kind {
        MachineKind::XlXe => "XL/XE",
        MachineKind::Other => "400/800",
    };
    let video = if machine.is_pal { "PAL" } else { "NTSC" };
    println!("machine: {kind} ({video})");
    if let Some(flags) = &machine.xl_flags {
        println!(
            "  builtin_basic: {}  builtin_game: {}  keyboard_detached: {}",
            flags.builtin_basic, flags.builtin_game, flags.keyboard_detached
        );
    }

    for (i, slot) in snapshot.sio.iter().enumerate() {
        if slot.status != 0 || !slot.filename.is_empty() {
            println!(
                "sio {}: status {} file {}",
                i + 1,
                slot.status,
                String::from_utf8_lossy(&slot.filename)
            );
        }
    }

    let antic = &snapshot.antic;
    println!(
        "antic: dlist ${:04x}  screen ${:04x}  dmactl ${:02x}  mode {}  ypos {}",
        antic.dlist, antic.screen_addr, antic.dmactl, antic.antic_mode, antic.ypos
    );

    let cpu = &snapshot.cpu;
    println!(
        "cpu: a ${:02x}  x ${:02x}  y ${:02x}  s ${:02x}  p ${:02x}  pc ${:04x}  irq {}",
        cpu.reg_a, cpu.reg_x, cpu.reg_y, cpu.reg_s, cpu.reg_p, cpu.pc, cpu.irq
    );

    print_memory(&cpu.memory);

    let gtia = &snapshot.gtia;
    println!(
        "gtia: prior ${:02x}  gractl ${:02x}  consol ${:02x}  colbk ${:02x}  trig_latch {}",
        gtia.prior, gtia.gractl, gtia.consol_mask, gtia.colbk, gtia.trig_latch
    );
}

fn print_memory(memory: &MemoryState) {
    println!(
        "memory: base {} KiB + {} xe banks -> {} KiB  portb ${:02x}",
        memory.base_ram_kb, memory.num_xe_banks, memory.ram_size_kb, memory.portb
    );

    let mut blocks = vec![("data", memory.data.len()), ("attrib", memory.attrib.len())];
    for (name, region) in [
        ("basic_rom", &memory.basic_rom),
        ("cart_shadow", &memory.cart_shadow),
        ("os_rom", &memory.os_rom),
        ("under_os", &memory.under_os),
        ("xe_game", &memory.xe_game),
        ("xe_memory", &memory.xe_memory),
    ] {
        if let Some(region) = region {
            blocks.push((name, region.len()));
        }
    }
    let blocks: Vec<String> = blocks
        .iter()
        .map(|(name, len)| format!("{name} [{} kb]", len / 1024))
        .collect();
    println!("  {}", blocks.join("  "));

    if let Some(map_ram) = memory.enable_map_ram {
        println!("  enable_map_ram: {map_ram}");
    }
}

fn dump_dlist(snapshot: &Snapshot) {
    let ram = &snapshot.cpu.memory.data;
    let start = (snapshot.antic.dlist as usize).min(ram.len());
    let end = (start + 256).min(ram.len());
    for (row, chunk) in ram[start..end].chunks(16).enumerate() {
        let bytes: Vec<String> = chunk.iter().map(|b| format!("{b:02x}")).collect();
        println!("{:04x}: {}", start + row * 16, bytes.join(" "));
    }
}
