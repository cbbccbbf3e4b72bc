//! Style properties that take part in scaling.

/// Property holding a transform list. Two element arrays under this name
/// are transform steps, not orientation pairs.
pub const TRANSFORM_PROPERTY: &str = "transform";

/// Numeric values of these properties are scaled with the viewport. Every
/// other number (`flex`, `opacity`, `zIndex`, ...) is left alone.
pub fn is_scaleable(property: &str) -> bool {
    matches!(
        property,
        "padding"
            | "paddingTop"
            | "paddingRight"
            | "paddingBottom"
            | "paddingLeft"
            | "paddingStart"
            | "paddingEnd"
            | "paddingHorizontal"
            | "paddingVertical"
            | "margin"
            | "marginTop"
            | "marginRight"
            | "marginBottom"
            | "marginLeft"
            | "marginStart"
            | "marginEnd"
            | "marginHorizontal"
            | "marginVertical"
            | "fontSize"
            | "letterSpacing"
            | "lineHeight"
            | "width"
            | "height"
            | "minWidth"
            | "minHeight"
            | "maxWidth"
            | "maxHeight"
            | "shadowRadius"
            | "shadowOffset"
            | "textShadowRadius"
            | "borderRadius"
            | "borderTopLeftRadius"
            | "borderTopRightRadius"
            | "borderTopStartRadius"
            | "borderTopEndRadius"
            | "borderBottomLeftRadius"
            | "borderBottomRightRadius"
            | "borderBottomStartRadius"
            | "borderBottomEndRadius"
            | "borderWidth"
            | "borderTopWidth"
            | "borderRightWidth"
            | "borderBottomWidth"
            | "borderLeftWidth"
            | "borderStartWidth"
            | "borderEndWidth"
            | "top"
            | "right"
            | "bottom"
            | "left"
            | "start"
            | "end"
            | "gap"
            | "rowGap"
            | "columnGap"
    )
}
