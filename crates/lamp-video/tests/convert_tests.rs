use lamp_base::Rgb;
use lamp_video::yuyv_to_rgb;

#[test]
fn test_neutral_chroma_is_gray() {
    // Y0 U Y1 V with U = V = 128
    let data = [0, 128, 255, 128, 100, 128, 50, 128];
    let frame = yuyv_to_rgb(&data, 2, 2).unwrap();
    assert_eq!(frame.pixel(0, 0), Rgb(0, 0, 0));
    assert_eq!(frame.pixel(1, 0), Rgb(255, 255, 255));
    assert_eq!(frame.pixel(0, 1), Rgb(100, 100, 100));
    assert_eq!(frame.pixel(1, 1), Rgb(50, 50, 50));
}

#[test]
fn test_chroma_shifts_channels() {
    // strong V pushes red up, strong U pushes blue up
    let reddish = yuyv_to_rgb(&[128, 128, 128, 240], 2, 1).unwrap().pixel(0, 0);
    assert!(reddish.0 > 200 && reddish.0 > reddish.2);

    let bluish = yuyv_to_rgb(&[128, 240, 128, 128], 2, 1).unwrap().pixel(0, 0);
    assert_eq!(bluish.2, 255);
    assert!(bluish.2 > bluish.0);
}

#[test]
fn test_rejects_short_or_odd_input() {
    assert!(yuyv_to_rgb(&[0; 7], 2, 2).is_none());
    assert!(yuyv_to_rgb(&[0; 12], 3, 2).is_none());
    // trailing bytes are ignored
    assert!(yuyv_to_rgb(&[0; 10], 2, 2).is_some());
}
