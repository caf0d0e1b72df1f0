//! End-to-end pipeline test: builds a tiny synthetic archive in memory,
//! containing one texture, one rigged actor, and the script pair that
//! links them, then drives it through the public API exactly as the CLI
//! would.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use cvrtool::driver::{OutputSink, process_archive};

#[derive(Default, Clone)]
struct MemorySink {
    files: Rc<RefCell<HashMap<String, Vec<u8>>>>,
}

struct RecordingWriter {
    path: String,
    files: Rc<RefCell<HashMap<String, Vec<u8>>>>,
}

impl OutputSink for MemorySink {
    fn create(&mut self, relative_path: &str) -> cvrtool::Result<Box<dyn Write>> {
        self.files.borrow_mut().entry(relative_path.to_string()).or_default();
        Ok(Box::new(RecordingWriter { path: relative_path.to_string(), files: Rc::clone(&self.files) }))
    }
}

impl Write for RecordingWriter {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        self.files.borrow_mut().get_mut(&self.path).unwrap().extend_from_slice(data);
        Ok(data.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn push_fixed_ascii(buf: &mut Vec<u8>, s: &str, size: usize) {
    let mut field = vec![0u8; size];
    field[..s.len()].copy_from_slice(s.as_bytes());
    buf.extend_from_slice(&field);
}

fn align_up(pos: usize) -> usize {
    (pos + 2047) & !2047
}

fn push_archive_file(data: &mut Vec<u8>, name: &str, payload: &[u8]) {
    push_fixed_ascii(data, name, 32);
    data.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(payload);
    data.resize(align_up(data.len()), 0);
}

fn push_directory(data: &mut Vec<u8>, name: &str, files: &[(&str, Vec<u8>)]) {
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());
    push_fixed_ascii(data, name, 32);
    data.extend_from_slice(&(files.len() as u32).to_le_bytes());
    for (name, payload) in files {
        push_archive_file(data, name, payload);
    }
}

/// A 2x2 RGB565 twiddled `PVRT` texture, matching the decoder's own test
/// fixture shape: a 16-byte header (magic, pixel format/data layout bytes
/// at offsets 8/9, width/height at 12/14) followed by four raw texels.
fn texture_payload() -> Vec<u8> {
    let mut data = vec![0u8; 16];
    data[0..4].copy_from_slice(b"PVRT");
    data[8] = 0x1; // RGB565
    data[9] = 0x1; // twiddled
    data[12..14].copy_from_slice(&2u16.to_le_bytes());
    data[14..16].copy_from_slice(&2u16.to_le_bytes());
    for texel in [0x0001u16, 0xF800u16, 0x07E0u16, 0x001Fu16] {
        data.extend_from_slice(&texel.to_le_bytes());
    }
    data
}

fn skeleton_payload(name: &str, nbones: u32) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(&nbones.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());
    push_fixed_ascii(&mut data, name, 32);
    for i in 0..nbones {
        push_fixed_ascii(&mut data, &format!("bone{i}"), 32);
        data.extend_from_slice(&i.to_le_bytes());
        for _ in 0..21 {
            data.extend_from_slice(&0.0f32.to_le_bytes());
        }
        data.extend(std::iter::repeat(0u8).take(96));
        let nchildren = u32::from(i + 1 < nbones);
        data.extend_from_slice(&nchildren.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
    }
    for i in 1..nbones {
        data.extend_from_slice(&i.to_le_bytes());
    }
    data
}

fn anim_payload(name: &str, nbones: u32, count: u32) -> Vec<u8> {
    let mut data = Vec::new();
    push_fixed_ascii(&mut data, name, 32);
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(&30.0f32.to_le_bytes());
    data.extend_from_slice(&1u32.to_le_bytes());
    data.extend_from_slice(&count.to_le_bytes());
    let nframes = count + 2;
    let stride = (nbones + 1) * 16;
    for i in 0..nframes {
        data.extend_from_slice(&(i * stride).to_le_bytes());
    }
    for _ in 0..nframes {
        data.extend_from_slice(&0u32.to_le_bytes());
        for _ in 0..nbones {
            for _ in 0..4 {
                data.extend_from_slice(&0.0f32.to_le_bytes());
            }
        }
        for _ in 0..4 {
            data.extend_from_slice(&0.0f32.to_le_bytes());
        }
    }
    data
}

fn mesh_payload(name: &str, nverts: u32) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&nverts.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend(std::iter::repeat(0u8).take(4 * 13));
    data.extend(std::iter::repeat(0u8).take(4 * 54));
    push_fixed_ascii(&mut data, name, 32);
    data.extend(std::iter::repeat(0u8).take(4 * 13));
    for _ in 0..nverts {
        for _ in 0..4 {
            data.extend_from_slice(&1.0f32.to_le_bytes());
        }
    }
    for _ in 0..nverts {
        for _ in 0..4 {
            data.extend_from_slice(&0.0f32.to_le_bytes());
        }
    }
    data.extend(std::iter::repeat(0u8).take(nverts as usize * 12));
    data
}

fn synthetic_archive() -> Vec<u8> {
    let mut data = Vec::new();
    push_directory(&mut data, "textures", &[("skin.pvr", texture_payload())]);
    push_directory(
        &mut data,
        "models",
        &[
            ("hero.ssk", skeleton_payload("hero", 2)),
            ("walk.saf", anim_payload("walk", 2, 4)),
            ("hero.scf", mesh_payload("hero", 3)),
        ],
    );
    push_directory(
        &mut data,
        "scripts",
        &[
            ("default_animsets.txt", b"ANIMSET_DEF_FILE\nANIMSET_DEF\nset\n1\nwalk\nENDFILE\n".to_vec()),
            ("default_actors.txt", b"ACTOR_DEF_FILE\nACTOR_DEF\nhero\nhero\nset\n0\n0\n0\n0\nENDFILE\n".to_vec()),
        ],
    );
    data
}

#[test]
fn full_pipeline_emits_texture_and_actor_animation() {
    let archive = synthetic_archive();
    let mut sink = MemorySink::default();
    let report = process_archive(&archive, &mut sink, false).unwrap();

    assert!(report.warnings.is_empty(), "unexpected warnings: {:?}", report.warnings);
    assert_eq!(report.textures_written, 1);
    assert_eq!(report.actors_written, 1);

    let files = sink.files.borrow();
    assert!(files.contains_key("textures/skin.png"));
    assert!(files.contains_key("actors/hero_walk.gltf"));
    assert!(files.contains_key("actors/hero_walk.bin"));
    assert!(files.contains_key("textures/skin.pvr"), "raw entries are always persisted");
}

#[test]
fn raw_only_mode_skips_conversion_entirely() {
    let archive = synthetic_archive();
    let mut sink = MemorySink::default();
    let report = process_archive(&archive, &mut sink, true).unwrap();

    assert_eq!(report.textures_written, 0);
    assert_eq!(report.actors_written, 0);
    let files = sink.files.borrow();
    assert!(files.contains_key("textures/skin.pvr"));
    assert!(!files.contains_key("textures/skin.png"));
}

#[test]
fn truncated_archive_is_a_fatal_error() {
    let mut sink = MemorySink::default();
    let err = process_archive(&[1, 2, 3], &mut sink, false).unwrap_err();
    assert!(matches!(err, cvrtool::Error::Truncated { .. }));
}
