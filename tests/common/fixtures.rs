use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use tagprice::{RecognitionError, RecognizedFragment};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const DARK: Rgb<u8> = Rgb([40, 40, 40]);

/// Creates a solid image of the given color
pub fn solid_image(width: u32, height: u32, color: Rgb<u8>) -> RgbImage {
    RgbImage::from_pixel(width, height, color)
}

/// Paints a filled rectangle onto `img`
pub fn paint_rect(img: &mut RgbImage, x: i32, y: i32, width: u32, height: u32, color: Rgb<u8>) {
    draw_filled_rect_mut(img, Rect::at(x, y).of_size(width, height), color);
}

/// Dark 400x300 scene with one white price tag at (50, 40) sized 200x60
pub fn scene_with_tag() -> RgbImage {
    let mut img = solid_image(400, 300, DARK);
    paint_rect(&mut img, 50, 40, 200, 60, WHITE);
    img
}

/// Fragment with an axis-aligned box of the given glyph height
pub fn fragment(text: &str, height: f32) -> RecognizedFragment {
    RecognizedFragment::from_rect(10.0, 10.0, 8.0 * text.len() as f32, height, text)
}

pub type Recognized = Result<Vec<RecognizedFragment>, RecognitionError>;
pub type RecognizeFn = Box<dyn Fn(&RgbImage) -> Recognized>;

/// Recognizer that returns the same fragments for every image
pub fn always(fragments: Vec<RecognizedFragment>) -> RecognizeFn {
    Box::new(move |_img: &RgbImage| -> Recognized { Ok(fragments.clone()) })
}

/// Recognizer that answers by image size, and reads nothing on other sizes
pub fn by_size(table: Vec<((u32, u32), Vec<RecognizedFragment>)>) -> RecognizeFn {
    Box::new(move |img: &RgbImage| -> Recognized {
        Ok(table
            .iter()
            .find(|(dims, _)| *dims == img.dimensions())
            .map(|(_, fragments)| fragments.clone())
            .unwrap_or_default())
    })
}

/// Recognizer that fails on every call
pub fn failing() -> RecognizeFn {
    Box::new(|_img: &RgbImage| -> Recognized {
        Err(RecognitionError::Engine("inference failed".to_string()))
    })
}

/// Serves one HTTP response on a local port.
///
/// Returns the base URL and a handle resolving to the request line received.
pub async fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub rate service");
    let addr = listener.local_addr().expect("stub has no local address");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("stub accept failed");

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.expect("stub read failed");
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {} STUB\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket
            .write_all(response.as_bytes())
            .await
            .expect("stub write failed");
        socket.shutdown().await.ok();

        String::from_utf8_lossy(&request)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    });

    (format!("http://{}", addr), handle)
}
