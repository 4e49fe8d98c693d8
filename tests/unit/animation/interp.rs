use super::*;

const FROM: [f32; 6] = [0.0, 10.0, -4.0, 1.5, 2.5, 3.5];
const TO: [f32; 6] = [8.0, -10.0, 4.0, 1.5, 0.0, 7.0];

#[test]
fn endpoints_reproduce_source_and_target_exactly() {
    let mut live = LiveBuffer::new(vec![0.0; 6]);
    live.blend(&FROM, &TO, Ease::InOutQuad, 0.0);
    assert_eq!(live.as_slice(), &FROM);
    live.blend(&FROM, &TO, Ease::InOutQuad, 1.0);
    assert_eq!(live.as_slice(), &TO);
}

#[test]
fn midpoint_is_the_average() {
    let mut out = [0.0f32; 6];
    blend_into(&mut out, &FROM, &TO, 0.5);
    for i in 0..6 {
        assert!((out[i] - (FROM[i] + TO[i]) / 2.0).abs() < 1e-6);
    }
}

#[test]
fn blend_uses_eased_progress() {
    let mut live = LiveBuffer::new(vec![0.0; 6]);
    live.blend(&FROM, &TO, Ease::InOutQuad, 0.25);
    // InOutQuad(0.25) = 0.125
    assert!((live.as_slice()[0] - 1.0).abs() < 1e-6);

    live.blend(&FROM, &TO, Ease::Linear, 0.25);
    assert!((live.as_slice()[0] - 2.0).abs() < 1e-6);
}

#[test]
fn dirty_flag_is_set_by_blend_and_cleared_by_take() {
    let mut live = LiveBuffer::new(FROM.to_vec());
    assert!(!live.is_dirty());
    assert!(!live.take_dirty());

    live.blend(&FROM, &TO, Ease::InOutQuad, 0.5);
    assert!(live.is_dirty());
    assert!(live.take_dirty());
    assert!(!live.is_dirty());
}

#[test]
fn particle_count_is_a_third_of_the_length() {
    assert_eq!(LiveBuffer::new(FROM.to_vec()).particle_count(), 2);
}
