use super::*;
use crate::core::vertex::generate_flat_quad;
use glam::Vec3;

fn quad(x: f32) -> MeshData {
    generate_flat_quad(Vec3::new(x, 0.0, 0.0), 1.0, 1.0)
}

fn buffer_with(keys: &[u32]) -> ObjectBuffer<u32> {
    let mut buffer = ObjectBuffer::new();
    for &k in keys {
        buffer.add_mesh(k, &quad(k as f32));
    }
    buffer
}

#[test]
fn test_hinzufuegen_versetzt_indizes() {
    let buffer = buffer_with(&[1, 2]);
    assert_eq!(buffer.len(), 2);
    assert_eq!(buffer.vertices().len(), 8);
    assert_eq!(&buffer.indices()[6..], &[4, 6, 5, 4, 7, 6]);
    assert!(buffer.contains(&2));
    assert_eq!(buffer.is_object_enabled(&1), Some(true));
}

#[test]
fn test_deaktivieren_nullt_indizes_ohne_schrumpfen() {
    let mut buffer = buffer_with(&[1, 2, 3]);
    assert!(buffer.disable_object(&2));
    assert_eq!(&buffer.indices()[6..12], &[0; 6]);
    assert_eq!(buffer.indices().len(), 18);
    assert_eq!(buffer.vertices().len(), 12);
    assert_eq!(buffer.active_objects(), 2);
    assert_eq!(buffer.drawable_triangles(), 4);
    assert_eq!(buffer.is_object_enabled(&2), Some(false));

    assert!(buffer.enable_object(&2));
    assert_eq!(&buffer.indices()[6..12], &[4, 6, 5, 4, 7, 6]);
    assert_eq!(buffer.drawable_triangles(), 6);
}

#[test]
fn test_unbekannter_schluessel_liefert_false() {
    let mut buffer = buffer_with(&[1]);
    assert!(!buffer.enable_object(&9));
    assert!(!buffer.disable_object(&9));
    assert_eq!(buffer.remove_object(&9), 0);
    assert_eq!(buffer.is_object_enabled(&9), None);
}

#[test]
fn test_entfernen_kompaktiert_und_erlaubt_neues_hinzufuegen() {
    let mut buffer = buffer_with(&[1, 2, 3]);
    buffer.disable_object(&3);
    assert_eq!(buffer.remove_object(&1), 1);

    assert_eq!(buffer.len(), 2);
    assert_eq!(buffer.vertices().len(), 8);
    // Objekt 2 rückt an den Anfang, Objekt 3 bleibt deaktiviert
    assert_eq!(&buffer.indices()[..6], &[0, 2, 1, 0, 3, 2]);
    assert_eq!(&buffer.indices()[6..], &[0; 6]);
    assert_eq!(buffer.object_vertices(&2).unwrap()[0].position.x, 2.0);

    buffer.add_mesh(1, &quad(5.0));
    assert!(buffer.contains(&1));
    assert_eq!(&buffer.indices()[12..], &[8, 10, 9, 8, 11, 10]);
    assert!(buffer.indices().iter().all(|&i| (i as usize) < buffer.vertices().len()));
}

#[test]
fn test_doppelte_schluessel_wirken_gemeinsam() {
    let mut buffer = buffer_with(&[0, 0, 7]);
    assert_eq!(buffer.handles_for(&0).len(), 2);
    assert!(buffer.disable_object(&0));
    assert_eq!(buffer.active_objects(), 1);
    assert_eq!(buffer.remove_object(&0), 2);
    assert_eq!(buffer.len(), 1);
    assert_eq!(buffer.keys().copied().collect::<Vec<_>>(), vec![7]);
}

#[test]
fn test_automatischer_upload_nach_jeder_aenderung() {
    let mut buffer = buffer_with(&[1]);
    let rev = buffer.uploaded().revision();
    assert!(rev >= 1);
    buffer.disable_object(&1);
    assert_eq!(buffer.uploaded().revision(), rev + 1);
    assert_eq!(buffer.uploaded().indices(), buffer.indices());
    assert_eq!(buffer.uploaded().vertex_bytes().len(), 4 * 32);
    assert_eq!(buffer.uploaded().index_bytes().len(), 6 * 4);
}

#[test]
fn test_manueller_upload_erst_bei_update_buffers() {
    let mut buffer: ObjectBuffer<u32> = ObjectBuffer::new_manual();
    buffer.add_mesh(1, &quad(0.0));
    buffer.add_mesh(2, &quad(1.0));
    assert_eq!(buffer.uploaded().revision(), 0);
    assert!(buffer.uploaded().indices().is_empty());

    buffer.update_buffers();
    assert_eq!(buffer.uploaded().revision(), 1);
    assert_eq!(buffer.uploaded().indices().len(), 12);
}

#[test]
fn test_absorbieren_ueberspringt_vorhandene_schluessel() {
    let mut main = buffer_with(&[1, 2]);
    let mut temp: ObjectBuffer<u32> = ObjectBuffer::new_manual();
    temp.add_mesh(2, &quad(10.0));
    temp.add_mesh(3, &quad(11.0));
    temp.disable_object(&3);

    let absorbed = main.absorb_buffer(&mut temp, false, true);
    assert_eq!(absorbed, 1);
    assert!(temp.is_empty());
    assert_eq!(main.len(), 3);
    assert_eq!(main.is_object_enabled(&3), Some(false));
    assert!(!main.update_manually());
    assert_eq!(main.uploaded().indices(), main.indices());
}

#[test]
fn test_absorbieren_mit_duplikaten() {
    let mut main = buffer_with(&[1]);
    let mut other = buffer_with(&[1]);
    assert_eq!(main.absorb_buffer(&mut other, true, false), 1);
    assert_eq!(main.handles_for(&1).len(), 2);
    assert_eq!(other.len(), 1);
}

#[test]
fn test_transformation_und_dump() {
    let mut buffer = buffer_with(&[1, 2]);
    buffer.disable_object(&2);
    buffer.apply_transform(|mut v| {
        v.position += Vec3::new(0.0, 1000.0, 0.0);
        v
    });
    assert!(buffer.vertices().iter().all(|v| v.position.y == 1000.0));

    let dump = buffer.dump_object_data();
    assert_eq!(dump.len(), 2);
    assert_eq!(dump[1].indices, vec![0, 2, 1, 0, 3, 2]);

    let rebuilt = ObjectBuffer::from_object_dump(&dump);
    assert_eq!(rebuilt.indices(), buffer.indices());
    assert_eq!(rebuilt.vertices(), buffer.vertices());
    assert_eq!(rebuilt.is_object_enabled(&2), Some(false));
}

#[test]
fn test_leeren_entfernt_alles() {
    let mut buffer = buffer_with(&[1, 2]);
    buffer.clear_objects();
    assert!(buffer.is_empty());
    assert!(buffer.indices().is_empty());
    assert!(!buffer.contains(&1));
}
