use padlink::backends::virtual_input::{VirtualBattery, VirtualGamepad};
use padlink::{
    Axis, ChannelSink, DeviceId, Manager, MethodCall, MethodCallHandler, MethodChannel, Settings,
    SinkError, DEFAULT_CHANNEL_NAME, LIST_GAMEPADS,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Stands in for the host's method channel: prints every call.
struct StdoutChannel;

impl MethodChannel for StdoutChannel {
    fn name(&self) -> &str {
        DEFAULT_CHANNEL_NAME
    }

    fn invoke_method(&self, method: &str, arguments: Value) -> Result<(), SinkError> {
        println!("{} {}", method, arguments);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_toml_str("battery_poll_interval_ms = 1000")?;

    let sink = ChannelSink::bind(StdoutChannel, &settings)?;
    info!("Forwarding on channel {}", sink.channel_name());
    let mgr = Manager::with_settings(settings, |id: DeviceId| id < 100, sink)?;

    let mut pad = VirtualGamepad::new(1, "Demo Virtual Pad");
    mgr.on_device_added(pad.id(), pad.name());
    mgr.on_device_added(100, "Demo Keyboard");

    let battery = Arc::new(VirtualBattery::new());
    battery.set(pad.id(), 0.8);
    mgr.start_battery_polling(battery.clone())?;

    let call = MethodCall::new(LIST_GAMEPADS);
    if let padlink::MethodResult::Success(list) = mgr.on_method_call(&call) {
        info!("listGamepads -> {}", list);
    }

    mgr.on_motion_event(&pad.motion());
    mgr.on_key_event(&pad.press_button(96));
    for step in 0..5 {
        mgr.on_motion_event(&pad.set_axis(Axis::X, step as f32 * 0.2));
        // jitter below the epsilon, filtered
        mgr.on_motion_event(&pad.set_axis(Axis::X, step as f32 * 0.2 + 0.0004));
    }
    mgr.on_key_event(&pad.release_button(96));

    tokio::time::sleep(Duration::from_millis(2500)).await;
    mgr.detach();

    Ok(())
}
